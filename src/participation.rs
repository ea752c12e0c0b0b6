//! Coarse "how much of my lineup has kicked off" signal.
//!
//! Counts every history fixture with a past kickoff across each player's whole
//! season, not just the current gameweek's fixtures.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::models::PlayerSummary;
use crate::source::FplSource;

pub fn started_fixture_count(history: &PlayerSummary, now: DateTime<Utc>) -> u32 {
    history
        .history
        .iter()
        .filter(|h| h.kickoff_time.is_some_and(|kickoff| kickoff < now))
        .count() as u32
}

/// Sums started fixtures over `lineup`. Ids listed twice are fetched and counted twice.
pub fn count_started(source: &dyn FplSource, lineup: &[u32], now: DateTime<Utc>) -> Result<u32> {
    let mut total = 0u32;
    for player_id in lineup {
        let history = source
            .player_history(*player_id)
            .with_context(|| format!("counting participation for player {player_id}"))?;
        total += started_fixture_count(&history, now);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::PlayerFixtureHistory;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, day, 15, 0, 0).unwrap()
    }

    fn history(days: &[Option<u32>]) -> PlayerSummary {
        PlayerSummary {
            history: days
                .iter()
                .map(|day| PlayerFixtureHistory {
                    kickoff_time: day.map(at),
                    ..PlayerFixtureHistory::default()
                })
                .collect(),
        }
    }

    #[test]
    fn counts_only_strictly_past_kickoffs() {
        let h = history(&[Some(1), Some(8), Some(15), Some(22), None]);
        assert_eq!(started_fixture_count(&h, at(15)), 2);
        assert_eq!(started_fixture_count(&h, at(16)), 3);
    }

    #[test]
    fn empty_history_counts_zero() {
        assert_eq!(started_fixture_count(&PlayerSummary::default(), at(30)), 0);
    }
}
