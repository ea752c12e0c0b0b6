use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::ScoringError;
use crate::http_client::http_client;
use crate::models::{
    Bootstrap, EntryHistory, EntrySummary, Fixture, LeagueEntry, LiveGameweek, NewEntrant,
    PicksResponse, PlayerSummary,
};
use crate::pagination::Page;
use crate::source::FplSource;

/// `FplSource` backed by the public fantasy API over blocking HTTP.
pub struct FplClient {
    client: &'static Client,
    api_base: String,
}

impl FplClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = http_client(config.request_timeout, &config.user_agent)?;
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.api_base, path);
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("request to {url} failed"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScoringError::HttpStatus {
                status: status.as_u16(),
                url,
            }
            .into());
        }
        let body = resp
            .text()
            .with_context(|| format!("failed reading body from {url}"))?;
        if is_blank_body(&body) {
            return Err(ScoringError::EmptyBody { url }.into());
        }
        Ok(body)
    }
}

impl FplSource for FplClient {
    fn bootstrap(&self) -> Result<Bootstrap> {
        let body = self
            .get_text("bootstrap-static/")
            .context("roster snapshot request failed")?;
        parse_bootstrap_json(&body)
    }

    fn entry_picks(&self, entry_id: u32, gameweek: u32) -> Result<PicksResponse> {
        let body = self
            .get_text(&format!("entry/{entry_id}/event/{gameweek}/picks/"))
            .with_context(|| format!("picks request failed for entry {entry_id} gw {gameweek}"))?;
        parse_picks_json(&body)
    }

    fn live_gameweek(&self, gameweek: u32) -> Result<LiveGameweek> {
        let body = self
            .get_text(&format!("event/{gameweek}/live/"))
            .with_context(|| format!("live stats request failed for gw {gameweek}"))?;
        parse_live_json(&body)
    }

    fn fixtures(&self, gameweek: u32) -> Result<Vec<Fixture>> {
        let body = self
            .get_text(&format!("fixtures/?event={gameweek}"))
            .with_context(|| format!("fixtures request failed for gw {gameweek}"))?;
        parse_fixtures_json(&body)
    }

    fn standings_page(&self, league_id: u32, page: u32) -> Result<Page<LeagueEntry>> {
        let body = self
            .get_text(&format!(
                "leagues-classic/{league_id}/standings/?page_standings={page}"
            ))
            .with_context(|| format!("standings page {page} request failed for league {league_id}"))?;
        Ok(parse_league_json(&body)?.standings)
    }

    fn new_entries_page(&self, league_id: u32, page: u32) -> Result<Page<NewEntrant>> {
        let body = self
            .get_text(&format!(
                "leagues-classic/{league_id}/standings/?page_new_entries={page}"
            ))
            .with_context(|| {
                format!("new entries page {page} request failed for league {league_id}")
            })?;
        Ok(parse_league_json(&body)?.new_entries)
    }

    fn player_history(&self, player_id: u32) -> Result<PlayerSummary> {
        let body = self
            .get_text(&format!("element-summary/{player_id}/"))
            .with_context(|| format!("history request failed for player {player_id}"))?;
        parse_player_summary_json(&body)
    }

    fn entry_summary(&self, entry_id: u32) -> Result<EntrySummary> {
        let body = self
            .get_text(&format!("entry/{entry_id}/"))
            .with_context(|| format!("entry request failed for {entry_id}"))?;
        parse_entry_summary_json(&body)
    }

    fn entry_history(&self, entry_id: u32) -> Result<EntryHistory> {
        let body = self
            .get_text(&format!("entry/{entry_id}/history/"))
            .with_context(|| format!("entry history request failed for {entry_id}"))?;
        parse_entry_history_json(&body)
    }
}

/// Both classic-league listings arrive in the same payload.
#[derive(Debug, Deserialize)]
pub struct LeagueResponse {
    pub standings: Page<LeagueEntry>,
    pub new_entries: Page<NewEntrant>,
}

fn is_blank_body(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "null"
}

/// A blank or `null` body is an error; scoring never falls back to defaults.
fn parse_json<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T> {
    if is_blank_body(raw) {
        return Err(anyhow!("empty {what} body"));
    }
    serde_json::from_str(raw.trim()).with_context(|| format!("invalid {what} json"))
}

pub fn parse_bootstrap_json(raw: &str) -> Result<Bootstrap> {
    parse_json(raw, "bootstrap")
}

pub fn parse_picks_json(raw: &str) -> Result<PicksResponse> {
    parse_json(raw, "picks")
}

pub fn parse_live_json(raw: &str) -> Result<LiveGameweek> {
    parse_json(raw, "live")
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    parse_json(raw, "fixtures")
}

pub fn parse_league_json(raw: &str) -> Result<LeagueResponse> {
    parse_json(raw, "league")
}

pub fn parse_player_summary_json(raw: &str) -> Result<PlayerSummary> {
    parse_json(raw, "element summary")
}

pub fn parse_entry_summary_json(raw: &str) -> Result<EntrySummary> {
    parse_json(raw, "entry")
}

pub fn parse_entry_history_json(raw: &str) -> Result<EntryHistory> {
    parse_json(raw, "entry history")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_null_bodies_are_detected() {
        assert!(is_blank_body(""));
        assert!(is_blank_body(" null\n"));
        assert!(!is_blank_body("[]"));
        assert!(!is_blank_body("{}"));
    }

    #[test]
    fn empty_body_error_names_the_url() {
        let err = ScoringError::EmptyBody {
            url: "https://example.test/api/entry/1/event/2/picks/".to_string(),
        };
        assert!(err.to_string().contains("entry/1/event/2/picks/"));
    }
}
