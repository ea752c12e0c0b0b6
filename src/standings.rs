use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::bonus::{self, BonusAward};
use crate::live_score::{LiveSnapshot, score_entry};
use crate::models::LeagueEntry;
use crate::pagination::{MAX_PAGES, Page, collect_pages};
use crate::participation::count_started;
use crate::picks::resolve_entry_picks;
use crate::pool::FetchPool;
use crate::roster::RosterCache;
use crate::source::FplSource;

/// One leaderboard line. `rank` is assigned after all pages are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub rank: u32,
    pub entry_id: u32,
    pub entry_name: String,
    pub manager_name: String,
    pub gameweek_total: i32,
    pub live_total: i32,
    pub previous_total: i32,
    pub last_rank: u32,
    pub bench_points: i32,
    pub captain: String,
    /// Chip played this gameweek, as the provider names it (`bboost`, `3xc`, ...).
    pub active_chip: Option<String>,
    pub players_started: u32,
}

#[derive(Debug, Clone)]
pub struct LeagueStandings {
    pub league_id: u32,
    pub gameweek: u32,
    pub rows: Vec<Row>,
    pub pages_fetched: u32,
    pub truncated: bool,
}

/// Request-scoped inputs shared read-only by every entry's scoring task.
pub struct ScoringRound<'a> {
    pub source: &'a dyn FplSource,
    pub roster: &'a RosterCache,
    pub gameweek: u32,
    pub bonus: BonusAward,
    pub live: LiveSnapshot,
    pub now: DateTime<Utc>,
}

impl<'a> ScoringRound<'a> {
    /// Fetches this gameweek's fixtures and live stats and derives the bonus
    /// award. Must complete before any entry is scored.
    pub fn prepare(
        source: &'a dyn FplSource,
        roster: &'a RosterCache,
        gameweek: u32,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let fixtures = source
            .fixtures(gameweek)
            .with_context(|| format!("loading fixtures for gw {gameweek}"))?;
        let bonus = bonus::allocate_gameweek(&fixtures)
            .with_context(|| format!("allocating bonus for gw {gameweek}"))?;
        debug!(
            gameweek,
            three = ?bonus.three,
            two = ?bonus.two,
            one = ?bonus.one,
            "bonus allocated"
        );
        let live = LiveSnapshot::fetch(source, gameweek)?;
        Ok(Self {
            source,
            roster,
            gameweek,
            bonus,
            live,
            now,
        })
    }

    pub fn build_row(&self, entry: &LeagueEntry) -> Result<Row> {
        let picks = resolve_entry_picks(self.source, entry.entry, self.gameweek)?;
        let score = score_entry(&picks, &self.live, &self.bonus);
        let players_started = count_started(self.source, &picks.lineup(), self.now)
            .with_context(|| format!("participation for entry {}", entry.entry))?;
        let captain = picks
            .captain
            .map(|id| self.roster.player_name(id).to_string())
            .unwrap_or_default();
        debug!(
            entry = entry.entry,
            gw_total = score.gameweek_total,
            live_total = score.live_total,
            "entry scored"
        );
        Ok(Row {
            rank: entry.rank_sort,
            entry_id: entry.entry,
            entry_name: entry.entry_name.clone(),
            manager_name: entry.player_name.clone(),
            gameweek_total: score.gameweek_total,
            live_total: score.live_total,
            previous_total: picks.previous_total,
            last_rank: entry.last_rank,
            bench_points: picks.bench_points,
            captain,
            active_chip: picks.active_chip,
            players_started,
        })
    }
}

/// Stable sort by live total, highest first, then rank 1..=N by position.
pub fn rank_rows(rows: &mut [Row]) {
    rows.sort_by(|a, b| b.live_total.cmp(&a.live_total));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx as u32 + 1;
    }
}

pub fn compute_league_standings(
    round: &ScoringRound<'_>,
    league_id: u32,
    pool: &FetchPool,
) -> Result<LeagueStandings> {
    let merged = collect_pages("standings", MAX_PAGES, |page_number| {
        let page = round
            .source
            .standings_page(league_id, page_number)
            .with_context(|| format!("league {league_id} standings page {page_number}"))?;
        let rows = pool.install(|| {
            page.results
                .par_iter()
                .map(|entry| round.build_row(entry))
                .collect::<Result<Vec<Row>>>()
        })?;
        Ok(Page {
            has_next: page.has_next,
            page: page.page,
            results: rows,
        })
    })?;

    let mut rows = merged.items;
    rank_rows(&mut rows);
    info!(
        league_id,
        gameweek = round.gameweek,
        entries = rows.len(),
        pages = merged.pages_fetched,
        "league standings assembled"
    );
    Ok(LeagueStandings {
        league_id,
        gameweek: round.gameweek,
        rows,
        pages_fetched: merged.pages_fetched,
        truncated: merged.truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entry_id: u32, live_total: i32) -> Row {
        Row {
            rank: 0,
            entry_id,
            entry_name: format!("Team {entry_id}"),
            manager_name: String::new(),
            gameweek_total: 0,
            live_total,
            previous_total: live_total,
            last_rank: 0,
            bench_points: 0,
            captain: String::new(),
            active_chip: None,
            players_started: 0,
        }
    }

    #[test]
    fn ranks_are_dense_and_follow_live_total() {
        let mut rows = vec![row(1, 50), row(2, 80), row(3, 65), row(4, 10)];
        rank_rows(&mut rows);
        let order: Vec<u32> = rows.iter().map(|r| r.entry_id).collect();
        let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut rows = vec![row(7, 40), row(3, 40), row(9, 40)];
        rank_rows(&mut rows);
        let order: Vec<u32> = rows.iter().map(|r| r.entry_id).collect();
        assert_eq!(order, vec![7, 3, 9]);
        assert_eq!(rows[2].rank, 3);
    }
}
