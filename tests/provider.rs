use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use fpl_live::config::Config;
use fpl_live::fake_source::FakeSource;
use fpl_live::feed::spawn_provider;
use fpl_live::live_table::LiveTable;
use fpl_live::source::FplSource;
use fpl_live::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};

fn synthetic_table() -> Arc<LiveTable> {
    let source: Arc<dyn FplSource> = Arc::new(FakeSource::synthetic(11, 1, 40, 5));
    let config = Config {
        gameweek_override: Some(5),
        fetch_parallelism: 2,
        ..Config::default()
    };
    Arc::new(LiveTable::new(source, &config).expect("synthetic table"))
}

fn drain_until_idle(rx: &mpsc::Receiver<Delta>, state: &mut AppState) {
    let mut saw_loading = false;
    while let Ok(delta) = rx.recv_timeout(Duration::from_secs(10)) {
        let done = matches!(delta, Delta::Loading(false)) && saw_loading;
        if matches!(delta, Delta::Loading(true)) {
            saw_loading = true;
        }
        apply_delta(state, delta);
        if done {
            return;
        }
    }
    panic!("provider did not finish a refresh");
}

#[test]
fn refresh_delivers_standings_and_entrants() {
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let handle = spawn_provider(synthetic_table(), tx, cmd_rx);

    cmd_tx
        .send(ProviderCommand::RefreshLeague { league_id: 1 })
        .unwrap();
    let mut state = AppState::new();
    drain_until_idle(&rx, &mut state);

    assert_eq!(state.rows.len(), 40);
    assert_eq!(state.gameweek, Some(5));
    assert!(!state.loading);
    assert!(state.logs.iter().any(|l| l.contains("40 entries")));

    drop(cmd_tx);
    handle.join().unwrap();
}

#[test]
fn unknown_league_reports_a_warning() {
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let handle = spawn_provider(synthetic_table(), tx, cmd_rx);

    cmd_tx
        .send(ProviderCommand::RefreshLeague { league_id: 404 })
        .unwrap();
    let mut state = AppState::new();
    drain_until_idle(&rx, &mut state);

    assert!(state.rows.is_empty());
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN] Standings failed")));

    drop(cmd_tx);
    handle.join().unwrap();
}

#[test]
fn manager_request_opens_profile() {
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let handle = spawn_provider(synthetic_table(), tx, cmd_rx);

    cmd_tx
        .send(ProviderCommand::FetchManager { entry_id: 10_003 })
        .unwrap();
    let delta = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    let mut state = AppState::new();
    apply_delta(&mut state, delta);

    assert_eq!(state.screen, Screen::Manager);
    let profile = state.manager.as_ref().unwrap();
    assert_eq!(profile.entry_id, 10_003);
    assert_eq!(profile.current_gameweek, 5);
    assert_eq!(profile.leagues[0].id, 1);

    drop(cmd_tx);
    handle.join().unwrap();
}
