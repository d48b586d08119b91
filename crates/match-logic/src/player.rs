//! Tournament participant

use crate::strategy::{Move, Strategy, StrategyKind};

/// A strategy instance plus its slot in the cohort and its running total.
#[derive(Clone, Debug)]
pub struct Player {
    strategy: Strategy,
    idx: u32,
    total_score: u64,
}

impl Player {
    pub fn new(strategy: Strategy, idx: u32) -> Self {
        Self {
            strategy,
            idx,
            total_score: 0,
        }
    }

    pub fn play(&self) -> Move {
        self.strategy.play()
    }

    pub fn update_strat(&mut self, opponent_move: Move) {
        self.strategy.update_state(opponent_move);
    }

    pub fn reset_strat(&mut self) {
        self.strategy.reset_state();
    }

    /// `<label>_<slot>`, e.g. `T_0`
    pub fn name(&self) -> String {
        format!("{}_{}", self.strategy.name(), self.idx)
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Zero-based position inside the cohort
    pub fn index(&self) -> u32 {
        self.idx
    }

    /// Cumulative score across every match played so far
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Only `Game::award_scores` writes here.
    pub(crate) fn award(&mut self, points: u32) {
        self.total_score += points as u64;
    }
}
