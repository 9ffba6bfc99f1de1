//! Duel engine: action resolution, legality, termination, the loop.
//!
//! The engine is deliberately split from `core`: `core` defines the
//! data, `engine` defines every transition that may touch it.

pub mod resolver;
pub mod runner;

pub use resolver::{illegal_penalty, legal_actions, resolve, Action, ActionSet};
pub use runner::{play_out, run_duel, score, DuelOutcome, Policy, TurnRecord};
