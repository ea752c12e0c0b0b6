use std::env;
use std::time::Duration;

use crate::error::ScoringError;

pub const DEFAULT_API_BASE: &str = "https://fantasy.premierleague.com/api";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Fpl,
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub fetch_parallelism: usize,
    pub gameweek_override: Option<u32>,
    pub default_league: Option<u32>,
    pub source: SourceKind,
    pub refresh_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            fetch_parallelism: 6,
            gameweek_override: None,
            default_league: None,
            source: SourceKind::Fpl,
            refresh_interval: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ScoringError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoringError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key).and_then(|val| {
                let trimmed = val.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };
        let defaults = Self::default();

        let api_base = get("FPL_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let user_agent = get("FPL_USER_AGENT").unwrap_or(defaults.user_agent);
        let request_timeout = Duration::from_secs(
            get("REQUEST_TIMEOUT_SECS")
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(10)
                .max(1),
        );
        let fetch_parallelism = get("FETCH_PARALLELISM")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(6)
            .clamp(1, 32);
        let gameweek_override = get("FPL_CURRENT_GW").and_then(|val| val.parse::<u32>().ok());
        let default_league = get("FPL_LEAGUE_ID").and_then(|val| val.parse::<u32>().ok());
        let source = match get("FPL_SOURCE").map(|val| val.to_lowercase()).as_deref() {
            None | Some("fpl") => SourceKind::Fpl,
            Some("fake") => SourceKind::Fake,
            Some(other) => return Err(ScoringError::UnknownSource(other.to_string())),
        };
        let refresh_interval = Duration::from_secs(
            get("FPL_REFRESH_SECS")
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(60)
                .max(15),
        );

        Ok(Self {
            api_base,
            user_agent,
            request_timeout,
            fetch_parallelism,
            gameweek_override,
            default_league,
            source,
            refresh_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.fetch_parallelism, 6);
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.source, SourceKind::Fpl);
        assert!(cfg.gameweek_override.is_none());
    }

    #[test]
    fn parallelism_is_clamped_and_base_trimmed() {
        let cfg = Config::from_lookup(lookup(&[
            ("FETCH_PARALLELISM", "500"),
            ("FPL_API_BASE", "http://localhost:9000/api/"),
            ("FPL_CURRENT_GW", "7"),
            ("FPL_REFRESH_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(cfg.fetch_parallelism, 32);
        assert_eq!(cfg.api_base, "http://localhost:9000/api");
        assert_eq!(cfg.gameweek_override, Some(7));
        assert_eq!(cfg.refresh_interval, Duration::from_secs(15));
    }

    #[test]
    fn blank_values_fall_back() {
        let cfg = Config::from_lookup(lookup(&[("FETCH_PARALLELISM", "  "), ("FPL_SOURCE", "")]))
            .unwrap();
        assert_eq!(cfg.fetch_parallelism, 6);
        assert_eq!(cfg.source, SourceKind::Fpl);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let err = Config::from_lookup(lookup(&[("FPL_SOURCE", "sqlite")])).unwrap_err();
        assert!(matches!(err, ScoringError::UnknownSource(ref s) if s == "sqlite"));
    }
}
