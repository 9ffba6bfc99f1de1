//! Uniformly random decision policy.

use crate::core::{DuelState, GameRng};
use crate::engine::Policy;

/// Picks a uniform code in 0..=6 from an owned seeded generator.
///
/// Deliberately ignores legality: resource-starved picks land on the
/// illegal penalty, which makes this a useful stress policy for the
/// engine and a weak baseline for evaluation.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    /// Create a random policy with its own seeded generator.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, _state: &DuelState) -> i32 {
        self.rng.gen_range(0..7)
    }
}
