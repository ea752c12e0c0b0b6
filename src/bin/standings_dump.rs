use anyhow::{Context, Result};

use fpl_live::config::Config;
use fpl_live::live_table::{LiveTable, default_league};
use fpl_live::logging;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr_logging();

    let config = Config::from_env()?;
    let league_id = match std::env::args().nth(1) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid league id `{raw}`"))?,
        None => default_league(&config)
            .context("usage: standings_dump <league_id> (or set FPL_LEAGUE_ID)")?,
    };

    let table = LiveTable::from_config(&config)?;
    let standings = table.standings(league_id)?;
    let entrants = table.new_entrants(league_id)?;

    println!("League {} | GW{}", standings.league_id, standings.gameweek);
    println!(
        "{:>4}  {:<24} {:>4} {:>6} {:>6} {:>5} {:>5}  {:<14} {:<8} {:>6}",
        "#", "Team", "GW", "Live", "Prev", "Last", "Bench", "Captain", "Chip", "Played"
    );
    for row in &standings.rows {
        println!(
            "{:>4}  {:<24} {:>4} {:>6} {:>6} {:>5} {:>5}  {:<14} {:<8} {:>6}",
            row.rank,
            truncate(&row.entry_name, 24),
            row.gameweek_total,
            row.live_total,
            row.previous_total,
            row.last_rank,
            row.bench_points,
            truncate(&row.captain, 14),
            row.active_chip.as_deref().unwrap_or("-"),
            row.players_started
        );
    }
    if standings.truncated {
        println!("(first {} pages only)", standings.pages_fetched);
    }

    if !entrants.is_empty() {
        println!();
        println!("New entrants: {}", entrants.len());
        for e in &entrants {
            println!("  {:>10}  {}  ({} {})", e.entry_id, e.entry_name, e.first_name, e.last_name);
        }
    }
    Ok(())
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
