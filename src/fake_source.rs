//! In-memory `FplSource` for tests and offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Result, anyhow};
use chrono::{Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::bonus::BPS_IDENTIFIER;
use crate::error::ScoringError;
use crate::models::{
    Bootstrap, ClassicLeague, EntryGameweekHistory, EntryHistory, EntryLeagues, EntrySummary,
    Fixture, FixtureStat, GameweekEvent, LeagueEntry, LiveElement, LiveGameweek, LivePlayerStats,
    NewEntrant, PastSeason, PerformanceEntry, Pick, PicksResponse, PlayerFixtureHistory,
    PlayerInfo, PlayerSummary, TeamInfo,
};
use crate::pagination::Page;
use crate::source::FplSource;

pub const DEFAULT_PAGE_SIZE: usize = 50;

const TEAM_SHORT_NAMES: [&str; 20] = [
    "ARS", "AVL", "BOU", "BRE", "BHA", "CHE", "CRY", "EVE", "FUL", "IPS", "LEI", "LIV", "MCI",
    "MUN", "NEW", "NFO", "SOU", "TOT", "WHU", "WOL",
];
const PLAYERS_PER_TEAM: u32 = 25;

pub struct FakeSource {
    bootstrap: Bootstrap,
    picks: HashMap<(u32, u32), PicksResponse>,
    live: HashMap<u32, LiveGameweek>,
    fixtures: HashMap<u32, Vec<Fixture>>,
    standings: HashMap<u32, Vec<LeagueEntry>>,
    new_entries: HashMap<u32, Vec<NewEntrant>>,
    histories: HashMap<u32, PlayerSummary>,
    summaries: HashMap<u32, EntrySummary>,
    entry_histories: HashMap<u32, EntryHistory>,
    failing_players: HashSet<u32>,
    page_size: usize,
    standings_requests: AtomicU32,
    new_entries_requests: AtomicU32,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            bootstrap: Bootstrap::default(),
            picks: HashMap::new(),
            live: HashMap::new(),
            fixtures: HashMap::new(),
            standings: HashMap::new(),
            new_entries: HashMap::new(),
            histories: HashMap::new(),
            summaries: HashMap::new(),
            entry_histories: HashMap::new(),
            failing_players: HashSet::new(),
            page_size: DEFAULT_PAGE_SIZE,
            standings_requests: AtomicU32::new(0),
            new_entries_requests: AtomicU32::new(0),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn with_picks(mut self, entry_id: u32, gameweek: u32, picks: PicksResponse) -> Self {
        self.picks.insert((entry_id, gameweek), picks);
        self
    }

    pub fn with_live(mut self, gameweek: u32, live: LiveGameweek) -> Self {
        self.live.insert(gameweek, live);
        self
    }

    pub fn with_fixtures(mut self, gameweek: u32, fixtures: Vec<Fixture>) -> Self {
        self.fixtures.insert(gameweek, fixtures);
        self
    }

    pub fn with_league(mut self, league_id: u32, entries: Vec<LeagueEntry>) -> Self {
        self.standings.insert(league_id, entries);
        self
    }

    pub fn with_new_entries(mut self, league_id: u32, entrants: Vec<NewEntrant>) -> Self {
        self.new_entries.insert(league_id, entrants);
        self
    }

    pub fn with_player_history(mut self, player_id: u32, history: PlayerSummary) -> Self {
        self.histories.insert(player_id, history);
        self
    }

    pub fn with_manager(mut self, summary: EntrySummary, history: EntryHistory) -> Self {
        self.entry_histories.insert(summary.id, history);
        self.summaries.insert(summary.id, summary);
        self
    }

    /// Makes every history request for `player_id` fail.
    pub fn failing_player_history(mut self, player_id: u32) -> Self {
        self.failing_players.insert(player_id);
        self
    }

    pub fn standings_requests(&self) -> u32 {
        self.standings_requests.load(Ordering::Relaxed)
    }

    pub fn new_entries_requests(&self) -> u32 {
        self.new_entries_requests.load(Ordering::Relaxed)
    }

    fn page_of<T: Clone>(&self, items: &[T], page: u32) -> Page<T> {
        let start = (page.saturating_sub(1) as usize).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(items.len());
        let results = if start < items.len() {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };
        Page {
            has_next: end < items.len(),
            page,
            results,
        }
    }

    /// A seeded, self-consistent league for offline use.
    pub fn synthetic(seed: u64, league_id: u32, entries: usize, gameweek: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let gameweek = gameweek.clamp(1, 38);
        let now = Utc::now();

        let teams: Vec<TeamInfo> = TEAM_SHORT_NAMES
            .iter()
            .enumerate()
            .map(|(idx, short)| TeamInfo {
                id: idx as u32 + 1,
                name: format!("{short} FC"),
                short_name: short.to_string(),
            })
            .collect();
        let players: Vec<PlayerInfo> = teams
            .iter()
            .flat_map(|team| {
                (0..PLAYERS_PER_TEAM).map(move |slot| {
                    let id = (team.id - 1) * PLAYERS_PER_TEAM + slot + 1;
                    PlayerInfo {
                        id,
                        web_name: format!("{}-{}", team.short_name, slot + 1),
                        first_name: String::new(),
                        second_name: String::new(),
                        team: team.id,
                        element_type: (slot % 4) as u8 + 1,
                    }
                })
            })
            .collect();
        let events = (1..=38)
            .map(|id| GameweekEvent {
                id,
                name: format!("Gameweek {id}"),
                deadline_time: None,
                finished: id < gameweek,
                is_previous: id + 1 == gameweek,
                is_current: id == gameweek,
                is_next: id == gameweek + 1,
            })
            .collect();

        let mut source = Self::new().with_bootstrap(Bootstrap {
            events,
            teams: teams.clone(),
            players: players.clone(),
        });

        let player_ids: Vec<u32> = players.iter().map(|p| p.id).collect();
        let live = LiveGameweek {
            elements: player_ids
                .iter()
                .map(|id| {
                    let minutes = if rng.gen_bool(0.7) { rng.gen_range(1..=90) } else { 0 };
                    let bonus = if minutes > 0 && rng.gen_bool(0.1) { rng.gen_range(1..=3) } else { 0 };
                    let total_points = if minutes > 0 { rng.gen_range(1..=12) + bonus } else { 0 };
                    LiveElement {
                        id: *id,
                        stats: LivePlayerStats {
                            minutes,
                            total_points,
                            bonus,
                            bps: rng.gen_range(0..=40),
                        },
                    }
                })
                .collect(),
        };
        source = source.with_live(gameweek, live);

        let fixtures = (0..10u32)
            .map(|idx| {
                let team_h = idx * 2 + 1;
                let team_a = idx * 2 + 2;
                let started = rng.gen_bool(0.8);
                let bps_side = |team: u32, rng: &mut StdRng| {
                    let mut side: Vec<PerformanceEntry> = (0..5)
                        .map(|slot| PerformanceEntry {
                            player_id: (team - 1) * PLAYERS_PER_TEAM + slot * 3 + 1,
                            value: rng.gen_range(0..=45),
                        })
                        .collect();
                    side.sort_by(|a, b| b.value.cmp(&a.value));
                    side
                };
                let stats = if started {
                    vec![FixtureStat {
                        identifier: BPS_IDENTIFIER.to_string(),
                        home: bps_side(team_h, &mut rng),
                        away: bps_side(team_a, &mut rng),
                    }]
                } else {
                    Vec::new()
                };
                let offset_hours = if started { -rng.gen_range(1..48) } else { rng.gen_range(1..48) };
                Fixture {
                    id: (gameweek - 1) * 10 + idx + 1,
                    event: Some(gameweek),
                    kickoff_time: Some(now + ChronoDuration::hours(offset_hours)),
                    team_h,
                    team_a,
                    started: Some(started),
                    finished: false,
                    stats,
                }
            })
            .collect();
        source = source.with_fixtures(gameweek, fixtures);

        for id in &player_ids {
            let history = (1..=gameweek)
                .map(|round| {
                    let weeks_ago = i64::from(gameweek - round);
                    let kickoff = now - ChronoDuration::weeks(weeks_ago) + ChronoDuration::hours(rng.gen_range(-30..30));
                    PlayerFixtureHistory {
                        fixture: (round - 1) * 10 + 1,
                        round,
                        kickoff_time: Some(kickoff),
                        minutes: rng.gen_range(0..=90),
                        total_points: rng.gen_range(0..=10),
                    }
                })
                .collect();
            source.histories.insert(*id, PlayerSummary { history });
        }

        let mut league = Vec::with_capacity(entries);
        let mut entrants = Vec::new();
        for idx in 0..entries {
            let entry_id = 10_000 + idx as u32;
            let squad: Vec<u32> = player_ids
                .choose_multiple(&mut rng, 15)
                .copied()
                .collect();
            let captain_slot = rng.gen_range(1..=11u8);
            let picks: Vec<Pick> = squad
                .iter()
                .enumerate()
                .map(|(slot, player_id)| {
                    let position = slot as u8 + 1;
                    Pick {
                        player_id: *player_id,
                        position,
                        multiplier: if position == captain_slot { 2 } else if position <= 11 { 1 } else { 0 },
                        is_captain: position == captain_slot,
                        is_vice_captain: position != captain_slot && position == 1,
                    }
                })
                .collect();
            let previous_total = rng.gen_range(40..=70) * (gameweek as i32 - 1);
            let event_points = rng.gen_range(20..=90);
            source.picks.insert(
                (entry_id, gameweek),
                PicksResponse {
                    active_chip: None,
                    entry_history: EntryGameweekHistory {
                        event: gameweek,
                        points: event_points,
                        total_points: previous_total + event_points,
                        points_on_bench: rng.gen_range(0..=15),
                    },
                    picks,
                },
            );
            if gameweek > 1 {
                source.picks.insert(
                    (entry_id, gameweek - 1),
                    PicksResponse {
                        active_chip: None,
                        entry_history: EntryGameweekHistory {
                            event: gameweek - 1,
                            points: 0,
                            total_points: previous_total,
                            points_on_bench: 0,
                        },
                        picks: Vec::new(),
                    },
                );
            }

            let entry_name = format!("Synthetic XI {}", idx + 1);
            let first_name = format!("Manager{}", idx + 1);
            league.push(LeagueEntry {
                id: entry_id,
                entry: entry_id,
                entry_name: entry_name.clone(),
                player_name: format!("{first_name} Test"),
                rank: idx as u32 + 1,
                last_rank: idx as u32 + 1,
                rank_sort: idx as u32 + 1,
                total: previous_total + event_points,
                event_total: event_points,
            });
            if rng.gen_bool(0.1) {
                entrants.push(NewEntrant {
                    entry_id,
                    entry_name: entry_name.clone(),
                    first_name: first_name.clone(),
                    last_name: "Test".to_string(),
                    joined_time: Some(now - ChronoDuration::days(rng.gen_range(0..14))),
                });
            }
            source.summaries.insert(
                entry_id,
                EntrySummary {
                    id: entry_id,
                    name: entry_name,
                    player_first_name: first_name,
                    player_last_name: "Test".to_string(),
                    leagues: EntryLeagues {
                        classic: vec![ClassicLeague {
                            id: league_id,
                            name: "Synthetic League".to_string(),
                        }],
                    },
                },
            );
            source.entry_histories.insert(
                entry_id,
                EntryHistory {
                    past: vec![PastSeason {
                        season_name: "2023/24".to_string(),
                        total_points: rng.gen_range(1800..=2600),
                        rank: rng.gen_range(1_000..=5_000_000),
                    }],
                },
            );
        }
        source.standings.insert(league_id, league);
        source.new_entries.insert(league_id, entrants);
        source
    }
}

impl FplSource for FakeSource {
    fn bootstrap(&self) -> Result<Bootstrap> {
        Ok(self.bootstrap.clone())
    }

    fn entry_picks(&self, entry_id: u32, gameweek: u32) -> Result<PicksResponse> {
        // Same shape as the provider's 404 for a gameweek the entry never played.
        self.picks.get(&(entry_id, gameweek)).cloned().ok_or_else(|| {
            ScoringError::HttpStatus {
                status: 404,
                url: format!("entry/{entry_id}/event/{gameweek}/picks/"),
            }
            .into()
        })
    }

    fn live_gameweek(&self, gameweek: u32) -> Result<LiveGameweek> {
        Ok(self.live.get(&gameweek).cloned().unwrap_or_default())
    }

    fn fixtures(&self, gameweek: u32) -> Result<Vec<Fixture>> {
        Ok(self.fixtures.get(&gameweek).cloned().unwrap_or_default())
    }

    fn standings_page(&self, league_id: u32, page: u32) -> Result<Page<LeagueEntry>> {
        self.standings_requests.fetch_add(1, Ordering::Relaxed);
        let entries = self
            .standings
            .get(&league_id)
            .ok_or_else(|| anyhow!("league {league_id} not found"))?;
        Ok(self.page_of(entries, page))
    }

    fn new_entries_page(&self, league_id: u32, page: u32) -> Result<Page<NewEntrant>> {
        self.new_entries_requests.fetch_add(1, Ordering::Relaxed);
        let entrants = self
            .new_entries
            .get(&league_id)
            .ok_or_else(|| anyhow!("league {league_id} not found"))?;
        Ok(self.page_of(entrants, page))
    }

    fn player_history(&self, player_id: u32) -> Result<PlayerSummary> {
        if self.failing_players.contains(&player_id) {
            return Err(anyhow!("history unavailable for player {player_id}"));
        }
        Ok(self.histories.get(&player_id).cloned().unwrap_or_default())
    }

    fn entry_summary(&self, entry_id: u32) -> Result<EntrySummary> {
        self.summaries
            .get(&entry_id)
            .cloned()
            .ok_or_else(|| anyhow!("entry {entry_id} not found"))
    }

    fn entry_history(&self, entry_id: u32) -> Result<EntryHistory> {
        Ok(self.entry_histories.get(&entry_id).cloned().unwrap_or_default())
    }
}
