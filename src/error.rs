use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("fixture {fixture_id}: {side} side lists {found} bps entries, need at least 3")]
    ShortBonusSide {
        fixture_id: u32,
        side: &'static str,
        found: usize,
    },

    #[error("http {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    #[error("no current gameweek in roster snapshot and FPL_CURRENT_GW is unset")]
    NoCurrentGameweek,

    #[error("unknown FPL_SOURCE `{0}` (expected `fpl` or `fake`)")]
    UnknownSource(String),
}
