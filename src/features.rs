//! Feature extraction for learned policies.
//!
//! Maps a duel snapshot to a fixed-length numeric vector from the
//! mover's perspective ("self" is whoever is to move). The encoding is
//! a pure, deterministic function of the snapshot; training pipelines
//! consume it downstream.

use crate::core::DuelState;

/// Length of the extracted feature vector.
pub const FEATURE_COUNT: usize = 19;

/// Encode a snapshot as `FEATURE_COUNT` values in roughly [0, 1].
///
/// Layout, in order: current-shell belief (exact when revealed, the
/// real-probability otherwise), self hp, opponent hp (both normalized),
/// self heal/reveal availability, opponent heal/reveal availability,
/// uncertainty `2 * |p_real - 0.5|`, normalized position, revealed
/// flag, hp difference, self double/skip-round flags, opponent
/// skip-round flag, self skip-bullet flag, opponent skip-bullet and
/// double flags, and the two transient marks.
///
/// ## Panics
///
/// Panics if the chamber is exhausted; terminal states have no mover
/// to encode for.
#[must_use]
pub fn extract(state: &DuelState) -> [f64; FEATURE_COUNT] {
    let mover = state.turn;
    let opponent = mover.other();
    let shell = state
        .current_shell()
        .expect("features extracted from an exhausted chamber");

    let pr_real = state.real_probability();
    let bullet = if shell.revealed {
        f64::from(u8::from(shell.real))
    } else {
        pr_real
    };

    let max_hp = f64::from(state.max_hp);
    let hp = f64::from(state.hp[mover]) / max_hp;
    let hp_opponent = f64::from(state.hp[opponent]) / max_hp;
    let flag = |charges: u8| f64::from(u8::from(charges > 0));

    [
        bullet,
        hp,
        hp_opponent,
        flag(state.heal_left[mover]),
        flag(state.reveal_left[mover]),
        flag(state.heal_left[opponent]),
        flag(state.reveal_left[opponent]),
        (pr_real - 0.5).abs() * 2.0,
        state.position as f64 / state.chamber.len() as f64,
        f64::from(u8::from(shell.revealed)),
        hp - hp_opponent,
        flag(state.double_left[mover]),
        flag(state.skip_round_left[mover]),
        flag(state.skip_round_left[opponent]),
        flag(state.skip_bullet_left[mover]),
        flag(state.skip_bullet_left[opponent]),
        flag(state.double_left[opponent]),
        f64::from(u8::from(state.double_mark)),
        f64::from(u8::from(state.skip_round_mark)),
    ]
}
