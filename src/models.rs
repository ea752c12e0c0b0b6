//! Response shapes for the scoring provider. Only the fields the scoring engine
//! reads are modelled; everything else in the payloads is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub events: Vec<GameweekEvent>,
    #[serde(default)]
    pub teams: Vec<TeamInfo>,
    #[serde(default, rename = "elements")]
    pub players: Vec<PlayerInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameweekEvent {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deadline_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub is_previous: bool,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamInfo {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerInfo {
    pub id: u32,
    #[serde(default)]
    pub web_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    #[serde(default)]
    pub team: u32,
    #[serde(default)]
    pub element_type: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PicksResponse {
    #[serde(default)]
    pub active_chip: Option<String>,
    #[serde(default)]
    pub entry_history: EntryGameweekHistory,
    #[serde(default)]
    pub picks: Vec<Pick>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryGameweekHistory {
    #[serde(default)]
    pub event: u32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub points_on_bench: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pick {
    #[serde(rename = "element")]
    pub player_id: u32,
    pub position: u8,
    #[serde(default)]
    pub multiplier: u8,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveGameweek {
    #[serde(default)]
    pub elements: Vec<LiveElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveElement {
    pub id: u32,
    #[serde(default)]
    pub stats: LivePlayerStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LivePlayerStats {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub bonus: i32,
    #[serde(default)]
    pub bps: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    pub id: u32,
    #[serde(default)]
    pub event: Option<u32>,
    #[serde(default)]
    pub kickoff_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub team_h: u32,
    #[serde(default)]
    pub team_a: u32,
    #[serde(default)]
    pub started: Option<bool>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub stats: Vec<FixtureStat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureStat {
    pub identifier: String,
    #[serde(default, rename = "h")]
    pub home: Vec<PerformanceEntry>,
    #[serde(default, rename = "a")]
    pub away: Vec<PerformanceEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PerformanceEntry {
    #[serde(rename = "element")]
    pub player_id: u32,
    pub value: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueEntry {
    #[serde(default)]
    pub id: u32,
    pub entry: u32,
    #[serde(default)]
    pub entry_name: String,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub last_rank: u32,
    #[serde(default)]
    pub rank_sort: u32,
    #[serde(default)]
    pub total: i32,
    #[serde(default)]
    pub event_total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntrant {
    #[serde(rename = "entry")]
    pub entry_id: u32,
    #[serde(default)]
    pub entry_name: String,
    #[serde(default, rename = "player_first_name")]
    pub first_name: String,
    #[serde(default, rename = "player_last_name")]
    pub last_name: String,
    #[serde(default)]
    pub joined_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerSummary {
    #[serde(default)]
    pub history: Vec<PlayerFixtureHistory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerFixtureHistory {
    #[serde(default)]
    pub fixture: u32,
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub kickoff_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub total_points: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntrySummary {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player_first_name: String,
    #[serde(default)]
    pub player_last_name: String,
    #[serde(default)]
    pub leagues: EntryLeagues,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryLeagues {
    #[serde(default)]
    pub classic: Vec<ClassicLeague>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicLeague {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryHistory {
    #[serde(default)]
    pub past: Vec<PastSeason>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastSeason {
    pub season_name: String,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub rank: u32,
}
