use anyhow::{Context, Result};
use tracing::info;

use crate::models::NewEntrant;
use crate::pagination::{MAX_PAGES, collect_pages};
use crate::source::FplSource;

/// Entries that recently joined the league, in provider order across pages.
pub fn compute_new_entrants(source: &dyn FplSource, league_id: u32) -> Result<Vec<NewEntrant>> {
    let merged = collect_pages("new_entries", MAX_PAGES, |page| {
        source
            .new_entries_page(league_id, page)
            .with_context(|| format!("league {league_id} new entries page {page}"))
    })?;
    info!(
        league_id,
        entrants = merged.items.len(),
        pages = merged.pages_fetched,
        "new entrants collected"
    );
    Ok(merged.items)
}
