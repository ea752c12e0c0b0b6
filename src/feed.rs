use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use tracing::{error, info};

use crate::live_table::LiveTable;
use crate::state::{Delta, ProviderCommand};

/// Runs scoring requests off the UI thread. Exits when either channel closes.
pub fn spawn_provider(
    table: Arc<LiveTable>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for cmd in cmd_rx {
            if handle_command(&table, &tx, cmd).is_err() {
                break;
            }
        }
        info!("provider thread stopped");
    })
}

fn handle_command(
    table: &LiveTable,
    tx: &Sender<Delta>,
    cmd: ProviderCommand,
) -> Result<(), std::sync::mpsc::SendError<Delta>> {
    match cmd {
        ProviderCommand::RefreshLeague { league_id } => {
            tx.send(Delta::Loading(true))?;
            match table.standings(league_id) {
                Ok(standings) => {
                    let count = standings.rows.len();
                    tx.send(Delta::SetStandings(standings))?;
                    tx.send(Delta::Log(format!(
                        "[INFO] League {league_id}: {count} entries scored for GW{}",
                        table.gameweek()
                    )))?;
                }
                Err(err) => {
                    error!(league_id, error = format!("{err:#}"), "standings request failed");
                    tx.send(Delta::Log(format!("[WARN] Standings failed: {err:#}")))?;
                }
            }
            match table.new_entrants(league_id) {
                Ok(entrants) => tx.send(Delta::SetNewEntrants { league_id, entrants })?,
                Err(err) => {
                    error!(league_id, error = format!("{err:#}"), "new entrants request failed");
                    tx.send(Delta::Log(format!("[WARN] New entrants failed: {err:#}")))?;
                }
            }
            tx.send(Delta::Loading(false))?;
        }
        ProviderCommand::FetchManager { entry_id } => match table.manager_profile(entry_id) {
            Ok(profile) => tx.send(Delta::SetManager(profile))?,
            Err(err) => {
                error!(entry_id, error = format!("{err:#}"), "manager request failed");
                tx.send(Delta::Log(format!("[WARN] Manager {entry_id} failed: {err:#}")))?;
            }
        },
    }
    Ok(())
}
