//! # shellduel
//!
//! A two-player, turn-based duel over a shuffled chamber of real and
//! fake shells, with limited-use items and pluggable decision policies,
//! including a one-ply Monte Carlo rollout search.
//!
//! ## Design Principles
//!
//! 1. **Typed, fixed-shape state**: `DuelState` is a plain struct whose
//!    invariants the resolver maintains and tests can check.
//!
//! 2. **Explicit randomness**: every stochastic choice flows from an
//!    owned, seeded `GameRng`; whole duels replay from a seed.
//!
//! 3. **Two failure channels, kept apart**: engine bugs (resolving past
//!    the chamber) panic; illegal policy decisions are a normal in-game
//!    penalty, never an error.
//!
//! 4. **Value-semantic speculation**: the rollout search works only on
//!    total clones of the live state, one per trial, each with its own
//!    forked RNG stream.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, duel state
//! - `engine`: action resolution, legality, termination, the duel loop
//! - `policy`: random, heuristic, and rollout-search policies
//! - `features`: snapshot encoding for learned policies
//! - `arena`: batch evaluation and dataset collection
//!
//! ## Example
//!
//! ```
//! use shellduel::core::{DuelConfig, DuelState, PlayerId};
//! use shellduel::engine::run_duel;
//! use shellduel::policy::{BaselinePolicy, RolloutSearch};
//!
//! let config = DuelConfig::new().with_shells(3, 3);
//! let state = DuelState::new(&config, 42);
//!
//! let mut searcher = RolloutSearch::new(20, 7);
//! let mut heuristic = BaselinePolicy::new();
//! let outcome = run_duel(state, &mut searcher, &mut heuristic);
//!
//! assert_eq!(outcome.score, outcome.final_state.hp[PlayerId::new(0)]
//!     - outcome.final_state.hp[PlayerId::new(1)]);
//! ```

pub mod arena;
pub mod core;
pub mod engine;
pub mod features;
pub mod policy;

// Re-export commonly used types
pub use crate::core::{DuelConfig, DuelState, GameRng, PlayerId, PlayerPair, Shell};

pub use crate::engine::{
    legal_actions, play_out, resolve, run_duel, score, Action, ActionSet, DuelOutcome, Policy,
    TurnRecord,
};

pub use crate::policy::{
    BaselinePolicy, HeuristicRollout, RandomPolicy, RolloutPolicy, RolloutSearch, ThresholdPolicy,
    UniformRollout,
};

pub use crate::arena::{collect_samples, play_many, winner_samples, MatchStats, Sample};

pub use crate::features::{extract, FEATURE_COUNT};
