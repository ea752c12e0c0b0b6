use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, warn};

/// Upper bound on pages fetched for one paginated listing.
pub const MAX_PAGES: u32 = 5;

/// One ordinal page of a provider listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub has_next: bool,
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<T>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    // Provider still reported more pages when the cap was reached.
    pub truncated: bool,
}

/// Fetches pages 1, 2, ... in order until the provider reports no further page
/// or `max_pages` pages have been fetched, concatenating results in page order.
/// Any fetch error aborts the whole walk.
pub fn collect_pages<T, F>(label: &str, max_pages: u32, mut fetch: F) -> Result<Paginated<T>>
where
    F: FnMut(u32) -> Result<Page<T>>,
{
    let mut items = Vec::new();
    let mut pages_fetched = 0u32;
    let mut truncated = false;

    while pages_fetched < max_pages.max(1) {
        let page_number = pages_fetched + 1;
        let page = fetch(page_number)?;
        pages_fetched = page_number;
        debug!(
            listing = label,
            page = page_number,
            results = page.results.len(),
            has_next = page.has_next,
            "fetched page"
        );
        items.extend(page.results);
        if !page.has_next {
            break;
        }
        if pages_fetched >= max_pages {
            truncated = true;
        }
    }

    if truncated {
        warn!(listing = label, pages = pages_fetched, "page cap reached, listing truncated");
    }

    Ok(Paginated {
        items,
        pages_fetched,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32, has_next: bool) -> Page<u32> {
        Page {
            has_next,
            page: n,
            results: vec![n * 10, n * 10 + 1],
        }
    }

    #[test]
    fn stops_when_provider_has_no_next_page() {
        let mut requested = Vec::new();
        let out = collect_pages("test", MAX_PAGES, |n| {
            requested.push(n);
            Ok(page(n, n < 2))
        })
        .unwrap();
        assert_eq!(requested, vec![1, 2]);
        assert_eq!(out.items, vec![10, 11, 20, 21]);
        assert!(!out.truncated);
    }

    #[test]
    fn never_exceeds_page_cap() {
        let mut calls = 0;
        let out = collect_pages("test", MAX_PAGES, |n| {
            calls += 1;
            Ok(page(n, true))
        })
        .unwrap();
        assert_eq!(calls, 5);
        assert_eq!(out.pages_fetched, 5);
        assert_eq!(out.items.len(), 10);
        assert!(out.truncated);
    }

    #[test]
    fn error_on_later_page_aborts() {
        let result = collect_pages("test", MAX_PAGES, |n| {
            if n == 3 {
                anyhow::bail!("boom");
            }
            Ok(page(n, true))
        });
        assert!(result.is_err());
    }

    #[test]
    fn zero_cap_still_fetches_first_page() {
        let out = collect_pages("test", 0, |n| Ok(page(n, true))).unwrap();
        assert_eq!(out.pages_fetched, 1);
    }
}
