//! Error codes for tournament construction and match play

use crate::strategy::StrategyKind;

/// Errors raised by the engine.
///
/// Construction errors come out of `Tournament::new`; the game errors guard
/// the match state machine against misuse.
#[derive(Clone, Debug, PartialEq)]
pub enum ArenaError {
    /// Roster does not hold exactly the supported number of classes.
    RosterSize { expected: usize, found: usize },
    /// Distribution counts do not line up with the roster.
    DistributionMismatch { classes: usize, counts: usize },
    /// The same strategy class appears twice in the roster.
    DuplicateClass(StrategyKind),
    /// Cooperation ratio outside [0, 1] or not finite.
    InvalidRatio(f64),
    /// Scores for this match were already added to the players.
    AlreadyAwarded,
    /// The match is over; no more rounds can be played.
    MatchClosed,
}

impl core::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArenaError::RosterSize { expected, found } =>
                write!(f, "roster must list exactly {} strategy classes, got {}", expected, found),
            ArenaError::DistributionMismatch { classes, counts } =>
                write!(f, "{} strategy classes but {} distribution counts", classes, counts),
            ArenaError::DuplicateClass(kind) =>
                write!(f, "strategy class {:?} listed more than once", kind),
            ArenaError::InvalidRatio(ratio) =>
                write!(f, "cooperation ratio {} is not within [0, 1]", ratio),
            ArenaError::AlreadyAwarded => write!(f, "match scores already awarded"),
            ArenaError::MatchClosed => write!(f, "match is closed"),
        }
    }
}

impl std::error::Error for ArenaError {}
