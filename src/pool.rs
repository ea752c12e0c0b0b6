use tracing::warn;

/// Bounded rayon pool for per-entry remote work. Falls back to the global pool
/// if a dedicated one cannot be built.
pub struct FetchPool {
    pool: Option<rayon::ThreadPool>,
    threads: usize,
}

impl FetchPool {
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fpl-fetch-{i}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(%err, "failed to build fetch pool, using global rayon pool");
                None
            }
        };
        Self { pool, threads }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn install<T>(&self, action: impl FnOnce() -> T + Send) -> T
    where
        T: Send,
    {
        if let Some(pool) = self.pool.as_ref() {
            pool.install(action)
        } else {
            action()
        }
    }
}
