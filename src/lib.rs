pub mod bonus;
pub mod config;
pub mod error;
pub mod fake_source;
pub mod feed;
pub mod fpl_fetch;
pub mod http_client;
pub mod live_score;
pub mod live_table;
pub mod logging;
pub mod manager;
pub mod models;
pub mod new_entries;
pub mod pagination;
pub mod participation;
pub mod picks;
pub mod pool;
pub mod roster;
pub mod source;
pub mod standings;
pub mod state;
