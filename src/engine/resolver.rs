//! Action resolution: the seven transitions and the illegal penalty.
//!
//! Policies hand the engine a raw `i32` code. Codes 0..=6 map to
//! `Action`s; anything else, or a rule-action whose precondition is not
//! met, resolves through the illegal penalty: self-damage plus a turn
//! flip. That penalty is a normal game outcome and never an error.
//!
//! The one genuinely fatal case is resolving a shot or reveal when the
//! chamber is already spent. The termination check fires before that
//! state is ever offered to a policy, so reaching it means a bug in the
//! caller, and the resolver panics rather than corrupting the state.
//!
//! ## Turn passing
//!
//! A real shell always passes the turn; a fake shell passes it only
//! when fired at the opponent; firing a blank at yourself keeps the
//! turn. A pending skip-round mark suppresses exactly one pass and is
//! consumed by it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DuelState, PlayerId};

/// The seven rule actions, in code order.
///
/// `Policy::decide` speaks raw codes; `from_code` is the boundary where
/// unknown values fall out as `None` and get routed to the penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Fire the current shell at yourself.
    ShootSelf,
    /// Fire the current shell at the opponent.
    ShootOpponent,
    /// Restore one shot's worth of hp, clamped to the cap.
    Heal,
    /// Reveal whether the current shell is real.
    Reveal,
    /// Double the damage of the next real shot.
    Double,
    /// Suppress the next turn pass.
    SkipRound,
    /// Discard the current shell unresolved.
    SkipBullet,
}

impl Action {
    /// All actions in ascending code order.
    ///
    /// The order matters: the rollout search breaks value ties by
    /// keeping the first (lowest-code) candidate.
    pub const ALL: [Action; 7] = [
        Action::ShootSelf,
        Action::ShootOpponent,
        Action::Heal,
        Action::Reveal,
        Action::Double,
        Action::SkipRound,
        Action::SkipBullet,
    ];

    /// The wire code for this action.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Decode a policy's code. `None` for anything outside 0..=6.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Action> {
        match code {
            0 => Some(Action::ShootSelf),
            1 => Some(Action::ShootOpponent),
            2 => Some(Action::Heal),
            3 => Some(Action::Reveal),
            4 => Some(Action::Double),
            5 => Some(Action::SkipRound),
            6 => Some(Action::SkipBullet),
            _ => None,
        }
    }
}

/// Inline-allocated legal action set; at most all seven actions.
pub type ActionSet = SmallVec<[Action; 7]>;

/// Enumerate the mover's legal actions in ascending code order.
///
/// Shooting (either target) is always legal. Items require a charge
/// plus their situational condition: heal needs missing hp, reveal an
/// unrevealed shell, the marks must not already be set, and skip-bullet
/// needs a shell left to skip.
#[must_use]
pub fn legal_actions(state: &DuelState) -> ActionSet {
    let mover = state.turn;
    let mut actions = ActionSet::new();

    actions.push(Action::ShootSelf);
    actions.push(Action::ShootOpponent);

    if state.heal_left[mover] > 0 && state.hp[mover] < state.max_hp {
        actions.push(Action::Heal);
    }
    if state.reveal_left[mover] > 0 && state.current_shell().is_some_and(|s| !s.revealed) {
        actions.push(Action::Reveal);
    }
    if state.double_left[mover] > 0 && !state.double_mark {
        actions.push(Action::Double);
    }
    if state.skip_round_left[mover] > 0 && !state.skip_round_mark {
        actions.push(Action::SkipRound);
    }
    if state.skip_bullet_left[mover] > 0 && !state.is_exhausted() {
        actions.push(Action::SkipBullet);
    }

    actions
}

/// Resolve a policy decision against the state.
///
/// Any code outside 0..=6 and any rule action whose precondition fails
/// are absorbed by the illegal penalty; the duel always continues.
///
/// ## Panics
///
/// Panics if a shot or reveal is resolved with the chamber already
/// spent. That state is terminal and must never reach the resolver.
pub fn resolve(state: &mut DuelState, code: i32) {
    match Action::from_code(code) {
        Some(Action::ShootSelf) => shoot(state, false),
        Some(Action::ShootOpponent) => shoot(state, true),
        Some(Action::Heal) => heal(state),
        Some(Action::Reveal) => reveal(state),
        Some(Action::Double) => use_double(state),
        Some(Action::SkipRound) => use_skip_round(state),
        Some(Action::SkipBullet) => use_skip_bullet(state),
        None => illegal_penalty(state),
    }
}

/// Apply the illegal-decision penalty: self-damage and a turn flip.
///
/// The flip is unconditional; a pending skip-round mark is not consumed
/// here, only by shot resolution.
pub fn illegal_penalty(state: &mut DuelState) {
    let mover = state.turn;
    state.hp[mover] -= state.damage_per_shot;
    state.illegal_moves[mover] += 1;
    state.turn = mover.other();
}

/// Resolve the current shell with the given target.
fn shoot(state: &mut DuelState, at_opponent: bool) {
    let Some(shell) = state.current_shell().copied() else {
        panic!(
            "shot resolved past the end of the chamber (position {} of {})",
            state.position,
            state.chamber.len()
        );
    };

    if shell.real {
        let target = if at_opponent {
            state.turn.other()
        } else {
            state.turn
        };
        let multiplier = if state.double_mark { 2 } else { 1 };
        state.hp[target] -= state.damage_per_shot * multiplier;
        state.left_real -= 1;
        pass_turn(state);
    } else {
        state.left_fake -= 1;
        // A blank fired at yourself retains the turn.
        if at_opponent {
            pass_turn(state);
        }
    }

    state.position += 1;
    state.double_mark = false;
}

/// Pass the turn, honoring a pending skip-round mark exactly once.
fn pass_turn(state: &mut DuelState) {
    if !state.skip_round_mark {
        state.turn = state.turn.other();
    }
    state.skip_round_mark = false;
}

fn heal(state: &mut DuelState) {
    let mover = state.turn;
    if state.heal_left[mover] > 0 {
        state.hp[mover] = (state.hp[mover] + state.damage_per_shot).min(state.max_hp);
        state.heal_left[mover] -= 1;
    } else {
        illegal_penalty(state);
    }
}

fn reveal(state: &mut DuelState) {
    let mover = state.turn;
    let position = state.position;
    assert!(
        position < state.chamber.len(),
        "reveal resolved past the end of the chamber (position {} of {})",
        position,
        state.chamber.len()
    );

    if state.reveal_left[mover] > 0 && !state.chamber[position].revealed {
        state.chamber[position].revealed = true;
        state.reveal_left[mover] -= 1;
    } else {
        illegal_penalty(state);
    }
}

fn use_double(state: &mut DuelState) {
    let mover = state.turn;
    if state.double_left[mover] > 0 && !state.double_mark {
        state.double_mark = true;
        state.double_left[mover] -= 1;
    } else {
        illegal_penalty(state);
    }
}

fn use_skip_round(state: &mut DuelState) {
    let mover = state.turn;
    if state.skip_round_left[mover] > 0 && !state.skip_round_mark {
        state.skip_round_mark = true;
        state.skip_round_left[mover] -= 1;
    } else {
        illegal_penalty(state);
    }
}

fn use_skip_bullet(state: &mut DuelState) {
    let mover = state.turn;
    if state.skip_bullet_left[mover] > 0 && !state.is_exhausted() {
        let skipped_real = state.chamber[state.position].real;
        if skipped_real {
            state.left_real -= 1;
        } else {
            state.left_fake -= 1;
        }
        state.position += 1;
        state.skip_bullet_left[mover] -= 1;
    } else {
        illegal_penalty(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DuelConfig;

    fn state_with(real: u32, fake: u32) -> DuelState {
        let config = DuelConfig::new()
            .with_shells(real, fake)
            .with_starting_player(PlayerId::new(0));
        DuelState::new(&config, 42)
    }

    fn force_chamber(state: &mut DuelState, shells: &[bool]) {
        state.chamber = shells.iter().map(|&r| crate::core::Shell::new(r)).collect();
        state.position = 0;
        state.left_real = shells.iter().filter(|&&r| r).count() as u32;
        state.left_fake = shells.len() as u32 - state.left_real;
    }

    #[test]
    fn test_action_code_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_code(action.code()), Some(action));
        }
        assert_eq!(Action::from_code(-1), None);
        assert_eq!(Action::from_code(7), None);
        assert_eq!(Action::from_code(42), None);
    }

    #[test]
    fn test_codes_are_ascending() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.code(), i as i32);
        }
    }

    #[test]
    fn test_legal_actions_full_options() {
        let mut state = state_with(2, 2);
        state.hp[PlayerId::new(0)] = 50; // heal becomes useful

        let legal = legal_actions(&state);
        assert_eq!(&legal[..], &Action::ALL[..]);
    }

    #[test]
    fn test_legal_actions_shots_only() {
        let config = DuelConfig::new()
            .with_shells(1, 1)
            .with_item_charges(0)
            .with_starting_player(PlayerId::new(0));
        let state = DuelState::new(&config, 42);

        let legal = legal_actions(&state);
        assert_eq!(&legal[..], &[Action::ShootSelf, Action::ShootOpponent]);
    }

    #[test]
    fn test_heal_not_legal_at_full_hp() {
        let state = state_with(2, 2);

        assert_eq!(state.hp[PlayerId::new(0)], state.max_hp);
        assert!(!legal_actions(&state).contains(&Action::Heal));
    }

    #[test]
    fn test_reveal_not_legal_on_revealed_shell() {
        let mut state = state_with(2, 2);
        state.chamber[0].revealed = true;

        assert!(!legal_actions(&state).contains(&Action::Reveal));
    }

    #[test]
    fn test_marks_gate_legality() {
        let mut state = state_with(2, 2);
        state.double_mark = true;
        state.skip_round_mark = true;

        let legal = legal_actions(&state);
        assert!(!legal.contains(&Action::Double));
        assert!(!legal.contains(&Action::SkipRound));
    }

    #[test]
    fn test_real_self_shot_damages_and_passes() {
        let mut state = state_with(1, 1);
        force_chamber(&mut state, &[true, false]);

        resolve(&mut state, Action::ShootSelf.code());

        assert_eq!(state.hp[PlayerId::new(0)], 100 - 34);
        assert_eq!(state.hp[PlayerId::new(1)], 100);
        assert_eq!(state.turn, PlayerId::new(1));
        assert_eq!(state.position, 1);
        assert_eq!(state.left_real, 0);
        assert_eq!(state.left_fake, 1);
    }

    #[test]
    fn test_fake_self_shot_retains_turn() {
        let mut state = state_with(1, 1);
        force_chamber(&mut state, &[false, true]);

        resolve(&mut state, Action::ShootSelf.code());

        assert_eq!(state.hp[PlayerId::new(0)], 100);
        assert_eq!(state.turn, PlayerId::new(0));
        assert_eq!(state.position, 1);
        assert_eq!(state.left_fake, 0);
    }

    #[test]
    fn test_fake_opponent_shot_passes() {
        let mut state = state_with(1, 1);
        force_chamber(&mut state, &[false, true]);

        resolve(&mut state, Action::ShootOpponent.code());

        assert_eq!(state.hp[PlayerId::new(1)], 100);
        assert_eq!(state.turn, PlayerId::new(1));
    }

    #[test]
    fn test_skip_round_mark_suppresses_pass_once() {
        let mut state = state_with(2, 0);
        force_chamber(&mut state, &[true, true]);
        state.skip_round_mark = true;

        resolve(&mut state, Action::ShootOpponent.code());

        // Mark consumed, pass suppressed.
        assert_eq!(state.turn, PlayerId::new(0));
        assert!(!state.skip_round_mark);

        resolve(&mut state, Action::ShootOpponent.code());

        // Second shot passes normally.
        assert_eq!(state.turn, PlayerId::new(1));
    }

    #[test]
    fn test_double_mark_doubles_once() {
        let mut state = state_with(2, 0);
        force_chamber(&mut state, &[true, true]);

        resolve(&mut state, Action::Double.code());
        assert!(state.double_mark);
        assert_eq!(state.double_left[PlayerId::new(0)], 0);
        // Using an item does not end the turn or touch the chamber.
        assert_eq!(state.turn, PlayerId::new(0));
        assert_eq!(state.position, 0);

        resolve(&mut state, Action::ShootOpponent.code());
        assert_eq!(state.hp[PlayerId::new(1)], 100 - 2 * 34);
        assert!(!state.double_mark);

        // Follow-up shot from the opponent is back to single damage.
        resolve(&mut state, Action::ShootOpponent.code());
        assert_eq!(state.hp[PlayerId::new(0)], 100 - 34);
    }

    #[test]
    fn test_double_mark_cleared_even_on_fake() {
        let mut state = state_with(1, 1);
        force_chamber(&mut state, &[false, true]);
        state.double_mark = true;

        resolve(&mut state, Action::ShootSelf.code());

        assert!(!state.double_mark);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut state = state_with(2, 2);
        state.hp[PlayerId::new(0)] = 90;

        resolve(&mut state, Action::Heal.code());

        assert_eq!(state.hp[PlayerId::new(0)], 100);
        assert_eq!(state.heal_left[PlayerId::new(0)], 0);
        assert_eq!(state.turn, PlayerId::new(0));
    }

    #[test]
    fn test_reveal_marks_shell() {
        let mut state = state_with(2, 2);

        resolve(&mut state, Action::Reveal.code());

        assert!(state.chamber[0].revealed);
        assert_eq!(state.reveal_left[PlayerId::new(0)], 0);
        assert_eq!(state.position, 0);
    }

    #[test]
    fn test_skip_bullet_advances_without_resolving() {
        let mut state = state_with(1, 1);
        force_chamber(&mut state, &[true, false]);

        resolve(&mut state, Action::SkipBullet.code());

        assert_eq!(state.position, 1);
        assert_eq!(state.left_real, 0);
        assert_eq!(state.left_fake, 1);
        assert_eq!(state.hp[PlayerId::new(0)], 100);
        assert_eq!(state.hp[PlayerId::new(1)], 100);
        assert_eq!(state.skip_bullet_left[PlayerId::new(0)], 0);
    }

    #[test]
    fn test_out_of_range_code_penalized() {
        let mut state = state_with(2, 2);

        resolve(&mut state, 9);

        assert_eq!(state.hp[PlayerId::new(0)], 100 - 34);
        assert_eq!(state.illegal_moves[PlayerId::new(0)], 1);
        assert_eq!(state.turn, PlayerId::new(1));
        // No game effect happened.
        assert_eq!(state.position, 0);
    }

    #[test]
    fn test_starved_item_penalized() {
        let config = DuelConfig::new()
            .with_shells(2, 2)
            .with_item_charges(0)
            .with_starting_player(PlayerId::new(0));
        let mut state = DuelState::new(&config, 42);

        resolve(&mut state, Action::Heal.code());

        assert_eq!(state.hp[PlayerId::new(0)], 100 - 34);
        assert_eq!(state.illegal_moves[PlayerId::new(0)], 1);
        assert_eq!(state.turn, PlayerId::new(1));
    }

    #[test]
    fn test_double_while_marked_penalized() {
        let mut state = state_with(2, 2);
        state.double_left[PlayerId::new(0)] = 2;
        state.double_mark = true;

        resolve(&mut state, Action::Double.code());

        assert_eq!(state.illegal_moves[PlayerId::new(0)], 1);
        // Charge not spent on the penalized attempt.
        assert_eq!(state.double_left[PlayerId::new(0)], 2);
    }

    #[test]
    fn test_reveal_already_revealed_penalized() {
        let mut state = state_with(2, 2);
        state.chamber[0].revealed = true;

        resolve(&mut state, Action::Reveal.code());

        assert_eq!(state.illegal_moves[PlayerId::new(0)], 1);
        assert_eq!(state.reveal_left[PlayerId::new(0)], 1);
    }

    #[test]
    fn test_penalty_flip_ignores_skip_round_mark() {
        let mut state = state_with(2, 2);
        state.skip_round_mark = true;

        resolve(&mut state, 99);

        assert_eq!(state.turn, PlayerId::new(1));
        assert!(state.skip_round_mark, "penalty must not consume the mark");
    }

    #[test]
    #[should_panic(expected = "past the end of the chamber")]
    fn test_shot_on_exhausted_chamber_panics() {
        let mut state = state_with(1, 0);
        state.position = 1;
        state.left_real = 0;

        resolve(&mut state, Action::ShootOpponent.code());
    }

    #[test]
    #[should_panic(expected = "past the end of the chamber")]
    fn test_reveal_on_exhausted_chamber_panics() {
        let mut state = state_with(1, 0);
        state.position = 1;
        state.left_real = 0;

        resolve(&mut state, Action::Reveal.code());
    }
}
