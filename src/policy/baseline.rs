//! Hand-written heuristic policies.
//!
//! `BaselinePolicy` is the fixed reference heuristic; `ThresholdPolicy`
//! generalizes it with tunable cut-offs so a pool of differently-tuned
//! opponents can be built for dataset collection. Both are pure
//! functions of the snapshot, with no internal randomness.

use crate::core::{DuelState, Shell};
use crate::engine::{Action, Policy};

/// Shared decision order used by both heuristics.
///
/// Priorities: heal when a full shot of hp is missing, learn the
/// current shell, act on a known shell (doubling first on a known
/// real), spend skip items while uncertain, otherwise shoot by
/// real-probability threshold, doubling before a committed opponent
/// shot when possible.
fn decide_with(
    state: &DuelState,
    t_shoot: f64,
    reveal_gate: impl Fn(f64) -> bool,
    use_gate: impl Fn(f64) -> bool,
) -> i32 {
    let mover = state.turn;
    let shell: &Shell = state
        .current_shell()
        .expect("policy consulted on an exhausted chamber");

    let pr_real = state.real_probability();
    let uncertainty = (pr_real - 0.5).abs();
    let can_double = state.double_left[mover] > 0 && !state.double_mark;

    if state.heal_left[mover] > 0 && state.max_hp - state.hp[mover] >= state.damage_per_shot {
        return Action::Heal.code();
    }
    if state.reveal_left[mover] > 0 && !shell.revealed && reveal_gate(uncertainty) {
        return Action::Reveal.code();
    }
    if shell.revealed {
        if can_double && shell.real {
            return Action::Double.code();
        }
        // Known fake goes at ourselves for the extra turn, known real
        // at the opponent.
        return if shell.real {
            Action::ShootOpponent.code()
        } else {
            Action::ShootSelf.code()
        };
    }
    if state.skip_round_left[mover] > 0 && !state.skip_round_mark && use_gate(uncertainty) {
        return Action::SkipRound.code();
    }
    if state.skip_bullet_left[mover] > 0 && use_gate(uncertainty) {
        return Action::SkipBullet.code();
    }
    if pr_real < t_shoot {
        Action::ShootSelf.code()
    } else if can_double {
        Action::Double.code()
    } else {
        Action::ShootOpponent.code()
    }
}

/// The fixed reference heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselinePolicy;

impl BaselinePolicy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Policy for BaselinePolicy {
    fn decide(&mut self, state: &DuelState) -> i32 {
        decide_with(state, 0.5, |_| true, |_| true)
    }
}

/// Tunable variant of the baseline heuristic.
///
/// - `t_shoot`: shoot self while the real probability is below this
/// - `t_reveal`: reveal only while `|p_real - 0.5| <= t_reveal`
/// - `t_use`: spend skip items only while `|p_real - 0.5| < t_use`
#[derive(Clone, Copy, Debug)]
pub struct ThresholdPolicy {
    pub t_shoot: f64,
    pub t_reveal: f64,
    pub t_use: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            t_shoot: 0.5,
            t_reveal: 0.5,
            t_use: 0.5,
        }
    }
}

impl ThresholdPolicy {
    #[must_use]
    pub fn new(t_shoot: f64, t_reveal: f64, t_use: f64) -> Self {
        Self {
            t_shoot,
            t_reveal,
            t_use,
        }
    }
}

impl Policy for ThresholdPolicy {
    fn decide(&mut self, state: &DuelState) -> i32 {
        decide_with(
            state,
            self.t_shoot,
            |u| u <= self.t_reveal,
            |u| u < self.t_use,
        )
    }
}
