use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{ClassicLeague, PastSeason};
use crate::source::FplSource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManagerProfile {
    pub entry_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub team_name: String,
    pub leagues: Vec<ClassicLeague>,
    pub past_seasons: Vec<PastSeason>,
    pub current_gameweek: u32,
}

impl ManagerProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn best_finish(&self) -> Option<&PastSeason> {
        self.past_seasons
            .iter()
            .filter(|s| s.rank > 0)
            .min_by_key(|s| s.rank)
    }
}

pub fn fetch_manager_profile(
    source: &dyn FplSource,
    entry_id: u32,
    current_gameweek: u32,
) -> Result<ManagerProfile> {
    let summary = source
        .entry_summary(entry_id)
        .with_context(|| format!("loading manager {entry_id}"))?;
    let history = source
        .entry_history(entry_id)
        .with_context(|| format!("loading past seasons for manager {entry_id}"))?;
    Ok(ManagerProfile {
        entry_id,
        first_name: summary.player_first_name,
        last_name: summary.player_last_name,
        team_name: summary.name,
        leagues: summary.leagues.classic,
        past_seasons: history.past,
        current_gameweek,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_finish_ignores_unranked_seasons() {
        let profile = ManagerProfile {
            past_seasons: vec![
                PastSeason {
                    season_name: "2021/22".to_string(),
                    total_points: 2100,
                    rank: 250_000,
                },
                PastSeason {
                    season_name: "2022/23".to_string(),
                    total_points: 2300,
                    rank: 41_000,
                },
                PastSeason {
                    season_name: "2023/24".to_string(),
                    total_points: 0,
                    rank: 0,
                },
            ],
            ..ManagerProfile::default()
        };
        assert_eq!(profile.best_finish().map(|s| s.season_name.as_str()), Some("2022/23"));
    }

    #[test]
    fn full_name_trims_missing_parts() {
        let profile = ManagerProfile {
            first_name: "Ada".to_string(),
            ..ManagerProfile::default()
        };
        assert_eq!(profile.full_name(), "Ada");
    }
}
