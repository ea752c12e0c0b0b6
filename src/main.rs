use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row as TableRow, Table, TableState};

use fpl_live::config::Config;
use fpl_live::feed::spawn_provider;
use fpl_live::live_table::{LiveTable, default_league};
use fpl_live::logging;
use fpl_live::state::{self, AppState, ProviderCommand, Screen, apply_delta};

struct App {
    state: AppState,
    should_quit: bool,
    league_id: u32,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    refresh_interval: Duration,
    last_refresh: Instant,
}

impl App {
    fn new(league_id: u32, cmd_tx: mpsc::Sender<ProviderCommand>, refresh_interval: Duration) -> Self {
        let mut state = AppState::new();
        state.league_id = Some(league_id);
        Self {
            state,
            should_quit: false,
            league_id,
            cmd_tx,
            refresh_interval,
            last_refresh: Instant::now(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_screen(Screen::Standings),
            KeyCode::Char('2') => self.state.set_screen(Screen::NewEntrants),
            KeyCode::Char('3') => self.state.set_screen(Screen::Manager),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('r') => self.request_refresh(true),
            KeyCode::Char('m') | KeyCode::Enter => self.request_manager(),
            KeyCode::Char('b') | KeyCode::Esc => self.state.set_screen(Screen::Standings),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn request_refresh(&mut self, announce: bool) {
        let cmd = ProviderCommand::RefreshLeague {
            league_id: self.league_id,
        };
        if self.cmd_tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Refresh request failed");
            return;
        }
        if announce {
            self.state.push_log("[INFO] Refresh requested");
        }
        self.last_refresh = Instant::now();
    }

    fn request_manager(&mut self) {
        let Some(entry_id) = self.state.selected_entry_id() else {
            self.state.push_log("[INFO] No entry selected");
            return;
        };
        if self
            .cmd_tx
            .send(ProviderCommand::FetchManager { entry_id })
            .is_err()
        {
            self.state.push_log("[WARN] Manager request failed");
        }
    }

    fn maybe_refresh(&mut self) {
        if self.state.loading {
            return;
        }
        if self.last_refresh.elapsed() >= self.refresh_interval {
            self.request_refresh(false);
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let _log_guard = logging::init_file_logging();

    let config = Config::from_env()?;
    let league_id = match std::env::args().nth(1) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid league id `{raw}`"))?,
        None => default_league(&config)
            .context("usage: fpl_live <league_id> (or set FPL_LEAGUE_ID)")?,
    };
    let table = Arc::new(LiveTable::from_config(&config)?);

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(Arc::clone(&table), tx, cmd_rx);

    let mut app = App::new(league_id, cmd_tx, config.refresh_interval);
    app.request_refresh(true);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_refresh();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Standings => render_standings(frame, chunks[1], &app.state),
        Screen::NewEntrants => render_new_entrants(frame, chunks[1], &app.state),
        Screen::Manager => render_manager(frame, chunks[1], &app.state),
    }

    render_log(frame, chunks[2], &app.state);

    let footer = Paragraph::new(
        "1 Table | 2 New | 3 Manager | j/k Move | Enter/m Manager | r Refresh | ? Help | q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, area);
    }
}

fn header_text(state: &AppState) -> String {
    let league = state
        .league_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let gw = state
        .gameweek
        .map(|gw| format!("GW{gw}"))
        .unwrap_or_else(|| "GW?".to_string());
    let updated = state
        .last_updated
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    let status = if state.loading { " | loading..." } else { "" };
    format!("FPL LIVE | League {league} | {gw} | Updated {updated}{status}")
}

fn render_standings(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.rows.is_empty() {
        let empty = Paragraph::new("No standings yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let header = TableRow::new(["#", "Team", "Manager", "GW", "Live", "Prev", "Last", "Bench", "Captain", "Chip", "Played"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = state.rows.iter().map(|row| {
        let movement = match row.last_rank {
            0 => Color::Reset,
            last if row.rank < last => Color::Green,
            last if row.rank > last => Color::Red,
            _ => Color::Reset,
        };
        TableRow::new(vec![
            Cell::from(row.rank.to_string()).style(Style::default().fg(movement)),
            Cell::from(row.entry_name.clone()),
            Cell::from(row.manager_name.clone()),
            Cell::from(row.gameweek_total.to_string()),
            Cell::from(row.live_total.to_string()),
            Cell::from(row.previous_total.to_string()),
            Cell::from(row.last_rank.to_string()),
            Cell::from(row.bench_points.to_string()),
            Cell::from(row.captain.clone()),
            Cell::from(row.active_chip.clone().unwrap_or_default()),
            Cell::from(row.players_started.to_string()),
        ])
    });
    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Min(14),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .highlight_style(Style::default().fg(Color::White).bg(Color::DarkGray));
    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_new_entrants(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.new_entrants.is_empty() {
        let empty = Paragraph::new("No new entrants").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let header = TableRow::new(["Entry", "Team", "First", "Last", "Joined"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = state.new_entrants.iter().map(|e| {
        TableRow::new(vec![
            e.entry_id.to_string(),
            e.entry_name.clone(),
            e.first_name.clone(),
            e.last_name.clone(),
            e.joined_time
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ])
    });
    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(11),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .highlight_style(Style::default().fg(Color::White).bg(Color::DarkGray));
    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_manager(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(profile) = state.manager.as_ref() else {
        let empty = Paragraph::new("Select an entry and press Enter")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", profile.team_name, profile.full_name()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Entry {} | GW{}", profile.entry_id, profile.current_gameweek)),
        Line::from(""),
        Line::from(Span::styled("Classic leagues", Style::default().fg(Color::Cyan))),
    ];
    for league in &profile.leagues {
        lines.push(Line::from(format!("  {:>8}  {}", league.id, league.name)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Past seasons", Style::default().fg(Color::Cyan))));
    for season in &profile.past_seasons {
        lines.push(Line::from(format!(
            "  {}  {:>5} pts  rank {}",
            season.season_name, season.total_points, season.rank
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_log(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(1) as usize;
    let start = state.logs.len().saturating_sub(visible);
    let text: Vec<Line> = state
        .logs
        .iter()
        .skip(start)
        .map(|line| Line::from(line.as_str()))
        .collect();
    let log = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP).title("Log"));
    frame.render_widget(log, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.min(56);
    let height = area.height.min(12);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    let text = "GW      live gameweek points (local bonus, captain x2)\n\
                Live    GW + total through last gameweek\n\
                Prev    total through last gameweek\n\
                Last    provider rank before this gameweek\n\
                Bench   points left on the bench\n\
                Chip    chip played this gameweek\n\
                Played  started fixtures across the lineup's season\n\
                \n\
                Press ? to close";
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help")),
        popup,
    );
}
