//! Match Logic for Prisoner's Arena
//!
//! Core game logic for the Iterated Prisoner's Dilemma round-robin:
//! strategies, players, matches, and the tournament that ranks them.

mod error;
mod random;
mod strategy;
mod player;
mod game;
mod pairing;
mod report;
mod tournament;

pub use error::ArenaError;
pub use random::SeededRng;
pub use strategy::{Move, Strategy, StrategyKind, StrategyParams, DEFAULT_COOPERATE_RATIO};
pub use player::Player;
pub use game::{run_match, Game, GamePhase, MatchResult, RoundResult, ROUNDS_PER_MATCH};
pub use pairing::{calculate_match_count, generate_all_pairings};
pub use report::{Color, ReportSink, ScoreEntry, ScoreReport};
pub use tournament::{RunSummary, Tournament, TournamentConfig, ROSTER_SIZE};

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u8, u8) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (1, 1),
        (Move::Cooperate, Move::Defect) => (3, 0),
        (Move::Defect, Move::Cooperate) => (0, 3),
        (Move::Defect, Move::Defect) => (2, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::{payoff, Move};
    use proptest::prelude::*;

    #[test]
    fn test_payoff_matrix() {
        assert_eq!(payoff(Move::Cooperate, Move::Cooperate), (1, 1));
        assert_eq!(payoff(Move::Cooperate, Move::Defect), (3, 0));
        assert_eq!(payoff(Move::Defect, Move::Cooperate), (0, 3));
        assert_eq!(payoff(Move::Defect, Move::Defect), (2, 2));
    }

    proptest! {
        #[test]
        fn prop_payoff_symmetric_and_bounded(a in any::<bool>(), b in any::<bool>()) {
            let to_move = |cooperate: bool| if cooperate { Move::Cooperate } else { Move::Defect };
            let (a, b) = (to_move(a), to_move(b));

            let (x, y) = payoff(a, b);
            let (y_swapped, x_swapped) = payoff(b, a);
            prop_assert_eq!((x, y), (x_swapped, y_swapped));
            prop_assert!(x as u16 + y as u16 <= 6);
        }
    }
}
