use anyhow::{Context, Result};
use tracing::debug;

use crate::error::ScoringError;
use crate::models::Pick;
use crate::source::FplSource;

/// Highest squad position that still counts as starting.
pub const LAST_STARTING_POSITION: u8 = 11;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPicks {
    pub entry_id: u32,
    pub gameweek: u32,
    /// Starting players with the captain removed.
    pub starters: Vec<u32>,
    pub captain: Option<u32>,
    pub bench_points: i32,
    /// Cumulative total through the previous gameweek.
    pub previous_total: i32,
    pub active_chip: Option<String>,
}

impl EntryPicks {
    /// Starting lineup reassembled as non-captain starters followed by the captain.
    pub fn lineup(&self) -> Vec<u32> {
        let mut ids = self.starters.clone();
        ids.extend(self.captain);
        ids
    }
}

/// Splits picks into non-captain starters and the captain. Bench picks are
/// dropped. If the provider flags more than one starting captain, the first
/// keeps the armband and the rest score as ordinary starters.
pub fn split_lineup(picks: &[Pick]) -> (Vec<u32>, Option<u32>) {
    let mut starters = Vec::new();
    let mut captain = None;
    for pick in picks.iter().filter(|p| p.position <= LAST_STARTING_POSITION) {
        if pick.is_captain && captain.is_none() {
            captain = Some(pick.player_id);
            continue;
        }
        starters.push(pick.player_id);
    }
    (starters, captain)
}

pub fn resolve_entry_picks(source: &dyn FplSource, entry_id: u32, gameweek: u32) -> Result<EntryPicks> {
    let current = source
        .entry_picks(entry_id, gameweek)
        .with_context(|| format!("resolving picks for entry {entry_id}"))?;

    // Gameweek 1 has no predecessor to fetch.
    let previous_total = if gameweek > 1 {
        match source.entry_picks(entry_id, gameweek - 1) {
            Ok(previous) => previous.entry_history.total_points,
            // Entries that joined this gameweek have no earlier picks.
            Err(err) if is_not_found(&err) => {
                debug!(entry_id, gameweek, "no previous picks, entry joined this gameweek");
                0
            }
            Err(err) => {
                return Err(err.context(format!("resolving previous total for entry {entry_id}")));
            }
        }
    } else {
        0
    };

    let (starters, captain) = split_lineup(&current.picks);
    Ok(EntryPicks {
        entry_id,
        gameweek,
        starters,
        captain,
        bench_points: current.entry_history.points_on_bench,
        previous_total,
        active_chip: current.active_chip,
    })
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ScoringError>(),
            Some(ScoringError::HttpStatus { status: 404, .. })
        )
    })
}
