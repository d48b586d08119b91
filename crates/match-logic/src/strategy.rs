//! Strategy definitions and state transitions

use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

/// Strategy class. Every player in a cohort shares one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Copy opponent's last move. Start with cooperate.
    TitForTat,
    /// Always defect, never cooperate.
    Hawk,
    /// Coin flip biased by the cooperation ratio, redrawn every round.
    Random,
    /// Cooperate until the opponent defects once, then defect for good.
    Grudge,
    /// Always cooperate, never defect.
    Dove,
}

impl StrategyKind {
    /// Every kind in the standard roster order
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::TitForTat,
        StrategyKind::Hawk,
        StrategyKind::Random,
        StrategyKind::Grudge,
        StrategyKind::Dove,
    ];

    /// One-character label used in player names
    pub fn label(self) -> char {
        match self {
            StrategyKind::TitForTat => 'T',
            StrategyKind::Hawk => 'H',
            StrategyKind::Random => 'R',
            StrategyKind::Grudge => 'G',
            StrategyKind::Dove => 'D',
        }
    }

    /// Human-readable description
    pub fn describe(self) -> &'static str {
        match self {
            StrategyKind::TitForTat => "Copies opponent's last move. Starts by cooperating.",
            StrategyKind::Hawk => "Never cooperates. Always defects.",
            StrategyKind::Random => "Cooperates with a fixed probability, redrawn every round.",
            StrategyKind::Grudge => "Cooperates until betrayed once, then always defects.",
            StrategyKind::Dove => "Never defects. Always cooperates.",
        }
    }
}

/// Default cooperation probability for the Random strategy
pub const DEFAULT_COOPERATE_RATIO: f64 = 0.7;

/// Strategy parameters shared by every player in a tournament
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Probability that the Random strategy cooperates (0.0-1.0)
    pub cooperate_ratio: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            cooperate_ratio: DEFAULT_COOPERATE_RATIO,
        }
    }
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), ArenaError> {
        let ratio = self.cooperate_ratio;
        if ratio.is_finite() && (0.0..=1.0).contains(&ratio) {
            Ok(())
        } else {
            Err(ArenaError::InvalidRatio(ratio))
        }
    }
}

/// A stateful strategy instance, one per player.
///
/// `play` reads the current state, `update_state` folds in the opponent's
/// move from the round just played, `reset_state` returns to the initial
/// condition.
#[derive(Clone, Debug)]
pub enum Strategy {
    TitForTat { state: Move },
    Hawk,
    Random { ratio: f64, state: Move, rng: SeededRng },
    Grudge { state: Move },
    Dove,
}

impl Strategy {
    /// Build a strategy in its initial state.
    ///
    /// Only the Random variant consumes `rng`; it draws its first move here.
    pub fn new(kind: StrategyKind, params: &StrategyParams, rng: SeededRng) -> Self {
        match kind {
            StrategyKind::TitForTat => Strategy::TitForTat { state: Move::Cooperate },
            StrategyKind::Hawk => Strategy::Hawk,
            StrategyKind::Random => {
                let mut rng = rng;
                let state = draw(params.cooperate_ratio, &mut rng);
                Strategy::Random { ratio: params.cooperate_ratio, state, rng }
            }
            StrategyKind::Grudge => Strategy::Grudge { state: Move::Cooperate },
            StrategyKind::Dove => Strategy::Dove,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::TitForTat { .. } => StrategyKind::TitForTat,
            Strategy::Hawk => StrategyKind::Hawk,
            Strategy::Random { .. } => StrategyKind::Random,
            Strategy::Grudge { .. } => StrategyKind::Grudge,
            Strategy::Dove => StrategyKind::Dove,
        }
    }

    /// The move this strategy makes in the upcoming round
    pub fn play(&self) -> Move {
        match self {
            Strategy::TitForTat { state } => *state,
            Strategy::Hawk => Move::Defect,
            Strategy::Random { state, .. } => *state,
            Strategy::Grudge { state } => *state,
            Strategy::Dove => Move::Cooperate,
        }
    }

    /// Observe the opponent's move from the round just played
    pub fn update_state(&mut self, opponent_move: Move) {
        match self {
            Strategy::TitForTat { state } => *state = opponent_move,
            Strategy::Random { ratio, state, rng } => *state = draw(*ratio, rng),
            Strategy::Grudge { state } => {
                if opponent_move == Move::Defect {
                    *state = Move::Defect;
                }
            }
            Strategy::Hawk | Strategy::Dove => {}
        }
    }

    /// Return to the initial condition. Random redraws.
    pub fn reset_state(&mut self) {
        match self {
            Strategy::TitForTat { state } | Strategy::Grudge { state } => *state = Move::Cooperate,
            Strategy::Random { ratio, state, rng } => *state = draw(*ratio, rng),
            Strategy::Hawk | Strategy::Dove => {}
        }
    }

    pub fn name(&self) -> char {
        self.kind().label()
    }
}

/// Cooperate with probability `ratio`
fn draw(ratio: f64, rng: &mut SeededRng) -> Move {
    if rng.next_f64() < ratio {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop, prop_assert_eq, prop_oneof, proptest, Just};

    fn make_rng() -> SeededRng {
        SeededRng::new(&[42u8; 32], 0)
    }

    fn make(kind: StrategyKind) -> Strategy {
        Strategy::new(kind, &StrategyParams::default(), make_rng())
    }

    fn random_with_ratio(ratio: f64) -> Strategy {
        Strategy::new(
            StrategyKind::Random,
            &StrategyParams { cooperate_ratio: ratio },
            make_rng(),
        )
    }

    fn any_move() -> impl proptest::strategy::Strategy<Value = Move> {
        prop_oneof![Just(Move::Cooperate), Just(Move::Defect)]
    }

    #[test]
    fn test_labels() {
        let labels: String = StrategyKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, "THRGD");
        assert_eq!(make(StrategyKind::Grudge).name(), 'G');
    }

    #[test]
    fn test_kind_round_trips_through_strategy() {
        for kind in StrategyKind::ALL {
            assert_eq!(make(kind).kind(), kind);
        }
    }

    #[test]
    fn test_tit_for_tat_first_move() {
        assert_eq!(make(StrategyKind::TitForTat).play(), Move::Cooperate);
    }

    #[test]
    fn test_tit_for_tat_copies() {
        let mut strategy = make(StrategyKind::TitForTat);

        strategy.update_state(Move::Defect);
        assert_eq!(strategy.play(), Move::Defect);

        strategy.update_state(Move::Cooperate);
        assert_eq!(strategy.play(), Move::Cooperate);
    }

    #[test]
    fn test_tit_for_tat_reset() {
        let mut strategy = make(StrategyKind::TitForTat);
        strategy.update_state(Move::Defect);
        strategy.reset_state();
        assert_eq!(strategy.play(), Move::Cooperate);
    }

    #[test]
    fn test_grudge_holds_after_defection() {
        let mut strategy = make(StrategyKind::Grudge);
        assert_eq!(strategy.play(), Move::Cooperate);

        strategy.update_state(Move::Cooperate);
        assert_eq!(strategy.play(), Move::Cooperate);

        strategy.update_state(Move::Defect);
        for _ in 0..10 {
            strategy.update_state(Move::Cooperate);
            assert_eq!(strategy.play(), Move::Defect);
        }

        strategy.reset_state();
        assert_eq!(strategy.play(), Move::Cooperate);
    }

    #[test]
    fn test_random_ratio_one_always_cooperates() {
        let mut strategy = random_with_ratio(1.0);
        for _ in 0..200 {
            assert_eq!(strategy.play(), Move::Cooperate);
            strategy.update_state(Move::Defect);
        }
    }

    #[test]
    fn test_random_ratio_zero_always_defects() {
        let mut strategy = random_with_ratio(0.0);
        for _ in 0..200 {
            assert_eq!(strategy.play(), Move::Defect);
            strategy.update_state(Move::Cooperate);
        }
    }

    #[test]
    fn test_random_follows_ratio() {
        let mut strategy = make(StrategyKind::Random);
        let samples = 5_000;
        let mut cooperations = 0;

        for _ in 0..samples {
            if strategy.play() == Move::Cooperate {
                cooperations += 1;
            }
            strategy.update_state(Move::Cooperate);
        }

        let share = cooperations as f64 / samples as f64;
        assert!(share > 0.65 && share < 0.75, "cooperation share {} not ~0.7", share);
    }

    #[test]
    fn test_random_same_stream_same_moves() {
        let mut a = make(StrategyKind::Random);
        let mut b = make(StrategyKind::Random);
        for _ in 0..50 {
            assert_eq!(a.play(), b.play());
            a.update_state(Move::Defect);
            b.update_state(Move::Cooperate);
        }
    }

    #[test]
    fn test_default_ratio_is_point_seven() {
        assert_eq!(StrategyParams::default().cooperate_ratio, 0.7);
    }

    #[test]
    fn test_params_validation() {
        assert!(StrategyParams { cooperate_ratio: 0.0 }.validate().is_ok());
        assert!(StrategyParams { cooperate_ratio: 1.0 }.validate().is_ok());
        assert_eq!(
            StrategyParams { cooperate_ratio: 1.5 }.validate(),
            Err(ArenaError::InvalidRatio(1.5))
        );
        assert!(StrategyParams { cooperate_ratio: -0.1 }.validate().is_err());
        assert!(StrategyParams { cooperate_ratio: f64::NAN }.validate().is_err());
    }

    #[test]
    fn test_params_missing_fields_default() {
        let params: StrategyParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, StrategyParams::default());
    }

    proptest! {
        #[test]
        fn prop_hawk_and_dove_are_constant(moves in prop::collection::vec(any_move(), 0..64)) {
            let mut hawk = make(StrategyKind::Hawk);
            let mut dove = make(StrategyKind::Dove);
            for m in moves {
                hawk.update_state(m);
                dove.update_state(m);
                prop_assert_eq!(hawk.play(), Move::Defect);
                prop_assert_eq!(dove.play(), Move::Cooperate);
            }
        }

        #[test]
        fn prop_tit_for_tat_mirrors_last_move(moves in prop::collection::vec(any_move(), 1..64)) {
            let mut strategy = make(StrategyKind::TitForTat);
            for m in moves {
                strategy.update_state(m);
                prop_assert_eq!(strategy.play(), m);
            }
        }

        #[test]
        fn prop_grudge_defects_iff_betrayed(moves in prop::collection::vec(any_move(), 0..64)) {
            let mut strategy = make(StrategyKind::Grudge);
            let mut betrayed = false;
            for m in moves {
                strategy.update_state(m);
                betrayed |= m == Move::Defect;
                let expected = if betrayed { Move::Defect } else { Move::Cooperate };
                prop_assert_eq!(strategy.play(), expected);
            }
        }
    }
}
