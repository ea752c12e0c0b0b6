use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::{Config, SourceKind};
use crate::fake_source::FakeSource;
use crate::fpl_fetch::FplClient;
use crate::manager::{ManagerProfile, fetch_manager_profile};
use crate::models::NewEntrant;
use crate::new_entries::compute_new_entrants;
use crate::pool::FetchPool;
use crate::roster::RosterCache;
use crate::source::FplSource;
use crate::standings::{LeagueStandings, ScoringRound, compute_league_standings};

const SYNTHETIC_SEED: u64 = 2024;
const SYNTHETIC_LEAGUE_ID: u32 = 1;
const SYNTHETIC_ENTRIES: usize = 120;
const SYNTHETIC_GAMEWEEK: u32 = 12;

/// League scoring entry point: owns the source, the season roster and the
/// worker pool for the life of the process.
pub struct LiveTable {
    source: Arc<dyn FplSource>,
    roster: Arc<RosterCache>,
    gameweek: u32,
    pool: FetchPool,
}

impl LiveTable {
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = source_from_config(config)?;
        Self::new(source, config)
    }

    /// Loads the roster snapshot once and fixes the gameweek being scored.
    pub fn new(source: Arc<dyn FplSource>, config: &Config) -> Result<Self> {
        let roster = RosterCache::load(source.as_ref())?;
        let gameweek = roster.resolve_gameweek(config.gameweek_override)?;
        let pool = FetchPool::new(config.fetch_parallelism);
        info!(
            gameweek,
            players = roster.player_count(),
            threads = pool.threads(),
            "roster loaded"
        );
        Ok(Self {
            source,
            roster: Arc::new(roster),
            gameweek,
            pool,
        })
    }

    pub fn gameweek(&self) -> u32 {
        self.gameweek
    }

    pub fn standings(&self, league_id: u32) -> Result<LeagueStandings> {
        self.standings_at(league_id, Utc::now())
    }

    /// Standings with an explicit reference time for the participation count.
    pub fn standings_at(&self, league_id: u32, now: DateTime<Utc>) -> Result<LeagueStandings> {
        info!(league_id, gameweek = self.gameweek, "computing live standings");
        let round = ScoringRound::prepare(self.source.as_ref(), &self.roster, self.gameweek, now)?;
        compute_league_standings(&round, league_id, &self.pool)
    }

    pub fn new_entrants(&self, league_id: u32) -> Result<Vec<NewEntrant>> {
        compute_new_entrants(self.source.as_ref(), league_id)
    }

    pub fn manager_profile(&self, entry_id: u32) -> Result<ManagerProfile> {
        fetch_manager_profile(self.source.as_ref(), entry_id, self.gameweek)
    }
}

pub fn source_from_config(config: &Config) -> Result<Arc<dyn FplSource>> {
    match config.source {
        SourceKind::Fpl => Ok(Arc::new(FplClient::new(config)?)),
        SourceKind::Fake => {
            info!("using synthetic offline league {SYNTHETIC_LEAGUE_ID}");
            Ok(Arc::new(FakeSource::synthetic(
                SYNTHETIC_SEED,
                SYNTHETIC_LEAGUE_ID,
                SYNTHETIC_ENTRIES,
                config.gameweek_override.unwrap_or(SYNTHETIC_GAMEWEEK),
            )))
        }
    }
}

/// League to show when none is given explicitly.
pub fn default_league(config: &Config) -> Option<u32> {
    match config.source {
        SourceKind::Fake => Some(config.default_league.unwrap_or(SYNTHETIC_LEAGUE_ID)),
        SourceKind::Fpl => config.default_league,
    }
}
