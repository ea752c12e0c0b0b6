use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::manager::ManagerProfile;
use crate::models::NewEntrant;
use crate::standings::{LeagueStandings, Row};

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Standings,
    NewEntrants,
    Manager,
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetStandings(LeagueStandings),
    SetNewEntrants {
        league_id: u32,
        entrants: Vec<NewEntrant>,
    },
    SetManager(ManagerProfile),
    Loading(bool),
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    RefreshLeague { league_id: u32 },
    FetchManager { entry_id: u32 },
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub league_id: Option<u32>,
    pub gameweek: Option<u32>,
    pub rows: Vec<Row>,
    pub truncated: bool,
    pub new_entrants: Vec<NewEntrant>,
    pub manager: Option<ManagerProfile>,
    pub selected: usize,
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Standings,
            league_id: None,
            gameweek: None,
            rows: Vec::new(),
            truncated: false,
            new_entrants: Vec::new(),
            manager: None,
            selected: 0,
            loading: false,
            last_updated: None,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push_back(line.into());
        while self.logs.len() > MAX_LOG_LINES {
            self.logs.pop_front();
        }
    }

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Standings => self.rows.len(),
            Screen::NewEntrants => self.new_entrants.len(),
            Screen::Manager => self.manager.as_ref().map(|m| m.leagues.len()).unwrap_or(0),
        }
    }

    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.selected = 0;
        }
    }

    pub fn selected_row(&self) -> Option<&Row> {
        if self.screen != Screen::Standings {
            return None;
        }
        self.rows.get(self.selected)
    }

    /// Entry under the cursor on either list screen.
    pub fn selected_entry_id(&self) -> Option<u32> {
        match self.screen {
            Screen::Standings => self.rows.get(self.selected).map(|r| r.entry_id),
            Screen::NewEntrants => self.new_entrants.get(self.selected).map(|e| e.entry_id),
            Screen::Manager => self.manager.as_ref().map(|m| m.entry_id),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.list_len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetStandings(standings) => {
            // Keep the cursor on the same entry when the table reorders.
            let followed = if state.screen == Screen::Standings {
                state.rows.get(state.selected).map(|r| r.entry_id)
            } else {
                None
            };
            state.league_id = Some(standings.league_id);
            state.gameweek = Some(standings.gameweek);
            state.truncated = standings.truncated;
            state.rows = standings.rows;
            state.last_updated = Some(Utc::now());
            if let Some(entry_id) = followed {
                if let Some(idx) = state.rows.iter().position(|r| r.entry_id == entry_id) {
                    state.selected = idx;
                }
            }
            state.clamp_selection();
            if state.truncated {
                state.push_log("[WARN] League has more than 5 pages; showing the first 5");
            }
        }
        Delta::SetNewEntrants { league_id, entrants } => {
            if state.league_id.is_none() || state.league_id == Some(league_id) {
                state.new_entrants = entrants;
                state.clamp_selection();
            }
        }
        Delta::SetManager(profile) => {
            state.manager = Some(profile);
            state.set_screen(Screen::Manager);
        }
        Delta::Loading(loading) => state.loading = loading,
        Delta::Log(line) => state.push_log(line),
    }
}
