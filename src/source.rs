use anyhow::Result;

use crate::models::{
    Bootstrap, EntryHistory, EntrySummary, Fixture, LeagueEntry, LiveGameweek, NewEntrant,
    PicksResponse, PlayerSummary,
};
use crate::pagination::Page;

/// Read-only operations against the scoring provider.
///
/// Implementations must be shareable across the per-entry worker pool.
pub trait FplSource: Send + Sync {
    fn bootstrap(&self) -> Result<Bootstrap>;
    fn entry_picks(&self, entry_id: u32, gameweek: u32) -> Result<PicksResponse>;
    fn live_gameweek(&self, gameweek: u32) -> Result<LiveGameweek>;
    fn fixtures(&self, gameweek: u32) -> Result<Vec<Fixture>>;
    fn standings_page(&self, league_id: u32, page: u32) -> Result<Page<LeagueEntry>>;
    fn new_entries_page(&self, league_id: u32, page: u32) -> Result<Page<NewEntrant>>;
    fn player_history(&self, player_id: u32) -> Result<PlayerSummary>;
    fn entry_summary(&self, entry_id: u32) -> Result<EntrySummary>;
    fn entry_history(&self, entry_id: u32) -> Result<EntryHistory>;
}
