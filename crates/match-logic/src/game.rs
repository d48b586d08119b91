//! Match execution engine

use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::player::Player;
use crate::strategy::Move;
use crate::payoff;

/// Rounds in a full match
pub const ROUNDS_PER_MATCH: u32 = 100;

/// Result of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    pub score_a: u8,
    pub score_b: u8,
    pub cumulative_a: u32,
    pub cumulative_b: u32,
}

/// Result of a complete match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_a: String,
    pub player_b: String,
    pub rounds: Vec<RoundResult>,
    pub total_score_a: u32,
    pub total_score_b: u32,
    pub round_count: u32,
}

/// Where a game is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed, no rounds played
    Idle,
    /// At least one round played, scores not yet awarded
    Playing,
    /// Scores handed to the players; terminal
    Awarded,
}

/// One match between two players.
///
/// Borrows both players for its lifetime and keeps its own running scores,
/// which only reach the players' totals through `award_scores`.
#[derive(Debug)]
pub struct Game<'a> {
    p1: &'a mut Player,
    p2: &'a mut Player,
    p1_score: u32,
    p2_score: u32,
    rounds: Vec<RoundResult>,
    phase: GamePhase,
}

impl<'a> Game<'a> {
    pub fn new(p1: &'a mut Player, p2: &'a mut Player) -> Self {
        Self {
            p1,
            p2,
            p1_score: 0,
            p2_score: 0,
            rounds: Vec::new(),
            phase: GamePhase::Idle,
        }
    }

    /// Play one round.
    ///
    /// Both moves are captured from pre-round state before either player
    /// observes the other, so update order cannot leak information.
    pub fn play_round(&mut self) -> Result<RoundResult, ArenaError> {
        if self.phase == GamePhase::Awarded {
            return Err(ArenaError::MatchClosed);
        }

        let move_a = self.p1.play();
        let move_b = self.p2.play();
        self.p1.update_strat(move_b);
        self.p2.update_strat(move_a);

        let (score_a, score_b) = payoff(move_a, move_b);
        self.p1_score += score_a as u32;
        self.p2_score += score_b as u32;

        let result = RoundResult {
            round: self.rounds.len() as u32,
            move_a,
            move_b,
            score_a,
            score_b,
            cumulative_a: self.p1_score,
            cumulative_b: self.p2_score,
        };
        self.rounds.push(result);
        self.phase = GamePhase::Playing;

        Ok(result)
    }

    /// Play `rounds` rounds back to back
    pub fn play(&mut self, rounds: u32) -> Result<(), ArenaError> {
        for _ in 0..rounds {
            self.play_round()?;
        }
        Ok(())
    }

    /// Add the match scores into both players' cumulative totals.
    ///
    /// One-shot: a second call fails and leaves the totals untouched.
    pub fn award_scores(&mut self) -> Result<MatchResult, ArenaError> {
        if self.phase == GamePhase::Awarded {
            return Err(ArenaError::AlreadyAwarded);
        }

        self.p1.award(self.p1_score);
        self.p2.award(self.p2_score);
        self.phase = GamePhase::Awarded;

        let rounds = std::mem::take(&mut self.rounds);
        Ok(MatchResult {
            player_a: self.p1.name(),
            player_b: self.p2.name(),
            round_count: rounds.len() as u32,
            rounds,
            total_score_a: self.p1_score,
            total_score_b: self.p2_score,
        })
    }

    /// Running match scores (p1, p2)
    pub fn scores(&self) -> (u32, u32) {
        (self.p1_score, self.p2_score)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds.len() as u32
    }
}

/// Run a complete match between two players and award the result.
///
/// # Arguments
/// * `p1` - Row player
/// * `p2` - Column player
/// * `rounds` - Number of rounds to play
///
/// # Returns
/// Complete match result with round-by-round details
pub fn run_match(p1: &mut Player, p2: &mut Player, rounds: u32) -> Result<MatchResult, ArenaError> {
    let mut game = Game::new(p1, p2);
    game.play(rounds)?;
    game.award_scores()
}
