//! Decision policies: random, heuristic, and rollout search.
//!
//! Everything here implements the `engine::Policy` capability; the
//! duel loop neither knows nor cares which one it is driving.

pub mod baseline;
pub mod random;
pub mod rollout;

pub use baseline::{BaselinePolicy, ThresholdPolicy};
pub use random::RandomPolicy;
pub use rollout::{HeuristicRollout, RolloutPolicy, RolloutSearch, UniformRollout};
