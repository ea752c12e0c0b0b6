use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::error::ScoringError;
use crate::models::{Bootstrap, GameweekEvent, PlayerInfo, TeamInfo};
use crate::source::FplSource;

/// Season snapshot of players, teams and the gameweek calendar.
///
/// Loaded once at startup and only read afterwards; refreshing it needs a restart.
#[derive(Debug, Clone, Default)]
pub struct RosterCache {
    players: HashMap<u32, PlayerInfo>,
    teams: HashMap<u32, TeamInfo>,
    events: Vec<GameweekEvent>,
}

impl RosterCache {
    pub fn load(source: &dyn FplSource) -> Result<Self> {
        let snapshot = source.bootstrap().context("failed to load roster snapshot")?;
        Ok(Self::from_bootstrap(snapshot))
    }

    pub fn from_bootstrap(snapshot: Bootstrap) -> Self {
        let players = snapshot.players.into_iter().map(|p| (p.id, p)).collect();
        let teams = snapshot.teams.into_iter().map(|t| (t.id, t)).collect();
        Self {
            players,
            teams,
            events: snapshot.events,
        }
    }

    /// Display name for a player, or an empty string when the id is unknown.
    pub fn player_name(&self, player_id: u32) -> &str {
        self.players
            .get(&player_id)
            .map(|p| p.web_name.as_str())
            .unwrap_or("")
    }

    pub fn team_short_name(&self, team_id: u32) -> &str {
        self.teams
            .get(&team_id)
            .map(|t| t.short_name.as_str())
            .unwrap_or("")
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current_gameweek(&self) -> Option<u32> {
        self.events.iter().find(|e| e.is_current).map(|e| e.id)
    }

    /// Gameweek to score: the override when given, else the calendar's current event.
    pub fn resolve_gameweek(&self, override_gw: Option<u32>) -> Result<u32, ScoringError> {
        override_gw
            .filter(|gw| *gw > 0)
            .or_else(|| self.current_gameweek())
            .ok_or(ScoringError::NoCurrentGameweek)
    }
}
