//! Prisoner's Arena - Iterated Prisoner's Dilemma Tournament
//!
//! Runner around `match-logic`: builds the tournament from configuration,
//! seeds the Random players, plays every pass and hands each pass's
//! standings to the configured report sinks.

pub mod config;
pub mod sink;

use anyhow::{Context, Result};
use log::{error, info, LevelFilter};
use match_logic::{ScoreReport, StrategyKind, Tournament};

use crate::config::{format_seed, ArenaConfig};
use crate::sink::{write_summary, MultiSink};

/// Initialize terminal logging at `level`.
pub fn log(level: LevelFilter) -> Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .context("initialize logger")
}

/// Process exit status for a finished run, logging the failure if any.
///
/// Falls back to stderr when the logger is not up yet (bad config, bad level).
pub fn exit_code(outcome: Result<()>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(e) => {
            if log::max_level() == LevelFilter::Off {
                eprintln!("error: {:#}", e);
            } else {
                error!("{:#}", e);
            }
            1
        }
    }
}

/// One line per strategy class: label, name, description
pub fn roster_listing() -> String {
    StrategyKind::ALL
        .iter()
        .map(|kind| format!("{}  {:<10} {}\n", kind.label(), format!("{:?}", kind), kind.describe()))
        .collect()
}

/// Play every configured pass and report after each one.
///
/// Returns the report of every pass, in order.
pub fn run(config: &ArenaConfig) -> Result<Vec<ScoreReport>> {
    let mut tournament_config = config.tournament.clone();
    tournament_config.seed = config.seed_bytes()?;
    tournament_config.record_rounds = config.write_matches;
    info!("seed {}", format_seed(&tournament_config.seed));

    let mut tournament = Tournament::new(&tournament_config).context("building tournament")?;
    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating output directory {}", config.out_dir.display()))?;
    let mut sink = MultiSink::for_format(config.format, &config.out_dir);

    let mut reports = Vec::with_capacity(config.iterations as usize);
    for _ in 0..config.iterations {
        let summary = tournament.run()?;
        if config.write_matches {
            let path = write_summary(&config.out_dir, &summary)?;
            info!("matches written to {}", path.display());
        }

        let report = tournament.plot_scores(&mut sink)?;
        if let Some(leader) = report.leader() {
            info!("pass {} leader: {} with {}", report.iteration, leader.name, leader.score);
        }
        reports.push(report);
    }

    Ok(reports)
}
