//! Round-robin tournament over a fixed roster of strategy classes

use std::collections::HashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::game::{run_match, MatchResult, ROUNDS_PER_MATCH};
use crate::pairing::generate_all_pairings;
use crate::player::Player;
use crate::random::SeededRng;
use crate::report::{Color, ReportSink, ScoreEntry, ScoreReport};
use crate::strategy::{Strategy, StrategyKind, StrategyParams};

/// Number of strategy classes a roster must list
pub const ROSTER_SIZE: usize = 5;

/// Everything needed to build a tournament
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Strategy classes in roster order; position decides the bar color
    pub roster: Vec<StrategyKind>,
    /// Players per class, aligned with `roster`
    pub distribution: Vec<u32>,
    /// Rounds per match
    pub rounds: u32,
    pub params: StrategyParams,
    /// Entropy seed for the Random players. Supplied by the caller, never read from config files.
    #[serde(skip)]
    pub seed: [u8; 32],
    /// Reset every strategy before each run after the first
    pub reset_between_runs: bool,
    /// Keep the round-by-round log of every match in `RunSummary`
    pub record_rounds: bool,
}

impl TournamentConfig {
    /// One player of each standard class, 100-round matches
    pub fn standard() -> Self {
        Self {
            roster: StrategyKind::ALL.to_vec(),
            distribution: vec![1; ROSTER_SIZE],
            rounds: ROUNDS_PER_MATCH,
            params: StrategyParams::default(),
            seed: [0u8; 32],
            reset_between_runs: false,
            record_rounds: false,
        }
    }

    pub fn population_size(&self) -> usize {
        self.distribution.iter().map(|&n| n as usize).sum()
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.roster.len() != ROSTER_SIZE {
            return Err(ArenaError::RosterSize {
                expected: ROSTER_SIZE,
                found: self.roster.len(),
            });
        }
        if self.distribution.len() != self.roster.len() {
            return Err(ArenaError::DistributionMismatch {
                classes: self.roster.len(),
                counts: self.distribution.len(),
            });
        }
        for (i, kind) in self.roster.iter().enumerate() {
            if self.roster[..i].contains(kind) {
                return Err(ArenaError::DuplicateClass(*kind));
            }
        }
        self.params.validate()
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of one `run_all_v_all` pass
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub iteration: u32,
    pub matches: Vec<MatchResult>,
}

impl RunSummary {
    /// Points handed out across every match of the run
    pub fn total_awarded(&self) -> u64 {
        self.matches
            .iter()
            .map(|m| m.total_score_a as u64 + m.total_score_b as u64)
            .sum()
    }
}

/// The player population plus its color classification.
///
/// Players persist across runs: cumulative scores keep growing and strategy
/// state carries over unless `reset_between_runs` is set.
#[derive(Clone, Debug)]
pub struct Tournament {
    players: Vec<Player>,
    colours: Vec<Color>,
    palette: HashMap<StrategyKind, Color>,
    rounds: u32,
    reset_between_runs: bool,
    record_rounds: bool,
    iteration: u32,
}

impl Tournament {
    pub fn new(config: &TournamentConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let palette: HashMap<StrategyKind, Color> = config
            .roster
            .iter()
            .copied()
            .zip(Color::PALETTE)
            .collect();

        let mut players = Vec::with_capacity(config.population_size());
        let mut colours = Vec::with_capacity(config.population_size());
        for (&kind, &count) in config.roster.iter().zip(&config.distribution) {
            for idx in 0..count {
                let stream = players.len() as u32;
                let rng = SeededRng::new(&config.seed, stream);
                players.push(Player::new(Strategy::new(kind, &config.params, rng), idx));
                colours.push(palette[&kind]);
            }
        }

        info!(
            "tournament built: {} players across {} classes, {} rounds per match",
            players.len(),
            config.roster.len(),
            config.rounds
        );

        Ok(Self {
            players,
            colours,
            palette,
            rounds: config.rounds,
            reset_between_runs: config.reset_between_runs,
            record_rounds: config.record_rounds,
            iteration: 0,
        })
    }

    /// Play every unique pair once, `rounds` rounds per match, and award
    /// each match into the players' totals.
    ///
    /// Round logs are dropped after each match unless `record_rounds` is set.
    pub fn run_all_v_all(&mut self, rounds: u32) -> Result<RunSummary, ArenaError> {
        if self.reset_between_runs && self.iteration > 0 {
            self.reset_strategies();
        }
        self.iteration += 1;

        let pairings = generate_all_pairings(self.players.len());
        let mut matches = Vec::with_capacity(pairings.len());
        for (a, b) in pairings {
            let (left, right) = self.players.split_at_mut(b);
            let mut result = run_match(&mut left[a], &mut right[0], rounds)?;
            if !self.record_rounds {
                result.rounds = Vec::new();
            }
            debug!(
                "{} vs {}: {}-{}",
                result.player_a, result.player_b, result.total_score_a, result.total_score_b
            );
            matches.push(result);
        }

        let summary = RunSummary {
            iteration: self.iteration,
            matches,
        };
        info!(
            "run {} complete: {} matches, {} points awarded",
            summary.iteration,
            summary.matches.len(),
            summary.total_awarded()
        );
        Ok(summary)
    }

    /// `run_all_v_all` with the configured round count
    pub fn run(&mut self) -> Result<RunSummary, ArenaError> {
        self.run_all_v_all(self.rounds)
    }

    /// Standings for the current iteration, highest score first
    pub fn score_report(&self) -> ScoreReport {
        let entries = self
            .players
            .iter()
            .zip(&self.colours)
            .map(|(player, &color)| ScoreEntry {
                name: player.name(),
                score: player.total_score(),
                color,
            })
            .collect();
        ScoreReport::new(self.iteration, entries)
    }

    /// Build the report and hand it to `sink`
    pub fn plot_scores<S: ReportSink>(&self, sink: &mut S) -> Result<ScoreReport, S::Error> {
        let report = self.score_report();
        sink.emit(&report)?;
        Ok(report)
    }

    pub fn reset_strategies(&mut self) {
        debug!("resetting {} strategies", self.players.len());
        for player in &mut self.players {
            player.reset_strat();
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn population_size(&self) -> usize {
        self.players.len()
    }

    /// Completed `run_all_v_all` calls
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn color_of(&self, kind: StrategyKind) -> Option<Color> {
        self.palette.get(&kind).copied()
    }

    /// Sum of every player's cumulative score
    pub fn total_score(&self) -> u64 {
        self.players.iter().map(Player::total_score).sum()
    }
}
