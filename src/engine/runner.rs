//! Duel loop: alternating decisions, resolution, termination, logging.
//!
//! The loop is policy-agnostic: anything that can map a state snapshot
//! to an action code plugs in through the `Policy` trait. The loop never
//! second-guesses a decision: whatever code comes back goes straight to
//! the resolver, which absorbs illegal ones as in-game penalties.
//!
//! Every turn is logged as a `(snapshot, action)` pair under the acting
//! player, in play order, for downstream dataset collection.

use serde::{Deserialize, Serialize};

use crate::core::{DuelState, PlayerId, PlayerPair};

use super::resolver::resolve;

/// Check whether the duel is over, and score it if so.
///
/// The duel ends when either player's hp reaches zero or below, or the
/// chamber is spent. The score is `hp0 - hp1`: positive favors player
/// 0, negative player 1, zero is a draw.
#[must_use]
pub fn score(state: &DuelState) -> Option<i32> {
    let hp0 = state.hp[PlayerId::new(0)];
    let hp1 = state.hp[PlayerId::new(1)];

    if hp0 <= 0 || hp1 <= 0 || state.is_exhausted() {
        Some(hp0 - hp1)
    } else {
        None
    }
}

/// A decision-making policy.
///
/// Given a read-only snapshot of the duel, return an action code. Any
/// `i32` is accepted; only 0..=6 are rule actions, and everything else
/// is resolved through the illegal penalty. `&mut self` lets stateful
/// policies (owned RNGs, search internals) advance between turns.
pub trait Policy {
    /// Choose an action code for the current mover.
    fn decide(&mut self, state: &DuelState) -> i32;
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn decide(&mut self, state: &DuelState) -> i32 {
        (**self).decide(state)
    }
}

/// One logged turn: the state the policy saw and the code it returned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Snapshot taken before the decision.
    pub state: DuelState,
    /// The chosen action code, as returned by the policy.
    pub action: i32,
}

/// Result of a completed duel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuelOutcome {
    /// Terminal score, `hp0 - hp1`.
    pub score: i32,
    /// The terminal state.
    pub final_state: DuelState,
    /// Per-player `(snapshot, action)` logs in play order.
    pub logs: PlayerPair<Vec<TurnRecord>>,
}

impl DuelOutcome {
    /// The winner, or `None` on a draw.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.score {
            s if s > 0 => Some(PlayerId::new(0)),
            s if s < 0 => Some(PlayerId::new(1)),
            _ => None,
        }
    }
}

/// Drive a duel to completion, logging every turn.
///
/// `first` moves as player 0, `second` as player 1; whose turn it is
/// comes from the state itself. A fatal precondition violation in the
/// resolver propagates as a panic; the loop never retries or recovers.
pub fn run_duel(
    mut state: DuelState,
    first: &mut dyn Policy,
    second: &mut dyn Policy,
) -> DuelOutcome {
    let mut policies: [&mut dyn Policy; 2] = [first, second];
    let mut logs: PlayerPair<Vec<TurnRecord>> = PlayerPair::new(Vec::new(), Vec::new());

    loop {
        if let Some(score) = score(&state) {
            return DuelOutcome {
                score,
                final_state: state,
                logs,
            };
        }

        let mover = state.turn;
        let action = policies[mover.index()].decide(&state);
        logs[mover].push(TurnRecord {
            state: state.clone(),
            action,
        });
        resolve(&mut state, action);
    }
}

/// Play a state to completion with one decision function for both
/// sides, returning only the terminal score.
///
/// This is the self-play continuation the rollout search runs on cloned
/// states: no logging, no per-player policy split.
pub fn play_out(mut state: DuelState, mut decide: impl FnMut(&DuelState) -> i32) -> i32 {
    loop {
        if let Some(score) = score(&state) {
            return score;
        }
        let action = decide(&state);
        resolve(&mut state, action);
    }
}
