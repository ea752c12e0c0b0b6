use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::bonus::BonusAward;
use crate::models::{LiveGameweek, LivePlayerStats};
use crate::picks::EntryPicks;
use crate::source::FplSource;

/// Per-player live figures for one gameweek, keyed by player id.
#[derive(Debug, Clone, Default)]
pub struct LiveSnapshot {
    stats: HashMap<u32, LivePlayerStats>,
}

impl LiveSnapshot {
    pub fn fetch(source: &dyn FplSource, gameweek: u32) -> Result<Self> {
        let live = source
            .live_gameweek(gameweek)
            .with_context(|| format!("loading live stats for gw {gameweek}"))?;
        Ok(Self::from_live(live))
    }

    pub fn from_live(live: LiveGameweek) -> Self {
        Self {
            stats: live.elements.into_iter().map(|e| (e.id, e.stats)).collect(),
        }
    }

    pub fn from_stats(stats: impl IntoIterator<Item = (u32, LivePlayerStats)>) -> Self {
        Self {
            stats: stats.into_iter().collect(),
        }
    }

    pub fn get(&self, player_id: u32) -> Option<&LivePlayerStats> {
        self.stats.get(&player_id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveScore {
    pub gameweek_total: i32,
    pub live_total: i32,
    /// Captain's adjusted points before doubling.
    pub captain_points: i32,
}

/// Provider points with the provider's own bonus swapped for the local award.
/// Players missing from the live snapshot score nothing.
pub fn adjusted_points(live: &LiveSnapshot, bonus: &BonusAward, player_id: u32) -> i32 {
    match live.get(player_id) {
        Some(stats) => stats.total_points - stats.bonus + bonus.points_for(player_id),
        None => 0,
    }
}

pub fn score_entry(picks: &EntryPicks, live: &LiveSnapshot, bonus: &BonusAward) -> LiveScore {
    let starters: i32 = picks
        .starters
        .iter()
        .map(|id| adjusted_points(live, bonus, *id))
        .sum();
    let captain_points = picks
        .captain
        .map(|id| adjusted_points(live, bonus, id))
        .unwrap_or(0);
    let gameweek_total = starters + 2 * captain_points;
    LiveScore {
        gameweek_total,
        live_total: gameweek_total + picks.previous_total,
        captain_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total_points: i32, bonus: i32) -> LivePlayerStats {
        LivePlayerStats {
            minutes: 90,
            total_points,
            bonus,
            bps: 0,
        }
    }

    #[test]
    fn captain_counts_double_once() {
        let starter_points = [4, 6, 2, 8, 0, 5, 3, 1, 9, 2];
        let mut entries: Vec<(u32, LivePlayerStats)> = starter_points
            .iter()
            .enumerate()
            .map(|(i, pts)| (i as u32 + 1, stats(*pts, 0)))
            .collect();
        entries.push((50, stats(7, 0)));
        let live = LiveSnapshot::from_stats(entries);
        let picks = EntryPicks {
            starters: (1..=10).collect(),
            captain: Some(50),
            previous_total: 100,
            ..EntryPicks::default()
        };
        let score = score_entry(&picks, &live, &BonusAward::default());
        assert_eq!(score.gameweek_total, 54);
        assert_eq!(score.captain_points, 7);
        assert_eq!(score.live_total, 154);
    }

    #[test]
    fn provider_bonus_replaced_by_local_award() {
        let live = LiveSnapshot::from_stats([(1, stats(12, 3)), (2, stats(5, 1))]);
        let bonus = BonusAward {
            three: vec![2],
            two: Vec::new(),
            one: vec![1],
        };
        assert_eq!(adjusted_points(&live, &bonus, 1), 10);
        assert_eq!(adjusted_points(&live, &bonus, 2), 7);
    }

    #[test]
    fn absent_players_contribute_zero_even_with_bonus() {
        let live = LiveSnapshot::default();
        let bonus = BonusAward {
            three: vec![1],
            ..BonusAward::default()
        };
        assert_eq!(adjusted_points(&live, &bonus, 1), 0);
    }

    #[test]
    fn empty_snapshot_yields_previous_total_only() {
        let picks = EntryPicks {
            starters: vec![1, 2, 3],
            captain: Some(4),
            previous_total: 321,
            ..EntryPicks::default()
        };
        let score = score_entry(&picks, &LiveSnapshot::default(), &BonusAward::default());
        assert_eq!(score.gameweek_total, 0);
        assert_eq!(score.live_total, 321);
    }

    #[test]
    fn missing_captain_doubles_nothing() {
        let live = LiveSnapshot::from_stats([(1, stats(5, 0))]);
        let picks = EntryPicks {
            starters: vec![1],
            captain: None,
            ..EntryPicks::default()
        };
        assert_eq!(score_entry(&picks, &live, &BonusAward::default()).gameweek_total, 5);
    }
}
