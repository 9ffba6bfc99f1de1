//! Core duel types: players, RNG, configuration, state.
//!
//! Everything here is plain data plus construction. The transition
//! rules that mutate `DuelState` live in `engine`.

pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use config::DuelConfig;
pub use player::{PlayerId, PlayerPair};
pub use rng::GameRng;
pub use state::{DuelState, Shell};
