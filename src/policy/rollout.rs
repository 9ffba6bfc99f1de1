//! One-ply Monte Carlo rollout search.
//!
//! For every legal action the search clones the live state, applies the
//! action, and completes the duel many times with a fixed sub-policy
//! deciding for *both* sides. Candidate actions are scored by the mean
//! terminal score from the mover's perspective; the best mean wins,
//! with ties kept on the first (lowest-code) candidate.
//!
//! Each trial draws from its own forked RNG stream, so trials never
//! share generator state and their aggregation is order-independent.
//!
//! The live state is never mutated: trials own their clones outright
//! and discard them. A fatal precondition violation inside a trial
//! (an engine bug) propagates as a panic; the search must not mask it.

use crate::core::{DuelState, GameRng, PlayerId};
use crate::engine::{legal_actions, play_out, resolve, Policy};

use super::baseline::BaselinePolicy;

/// Continuation policy for simulated trials.
///
/// Unlike `Policy`, a rollout policy is stateless across calls and
/// takes the trial's generator explicitly, so one instance can drive
/// both sides of every continuation.
pub trait RolloutPolicy {
    /// Choose an action code for the mover of a simulated state.
    fn decide(&self, state: &DuelState, rng: &mut GameRng) -> i32;
}

/// Uniform random continuation over all codes 0..=6.
///
/// Illegal picks resolve into penalties, which is part of the signal:
/// continuations model careless play on both sides.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformRollout;

impl RolloutPolicy for UniformRollout {
    fn decide(&self, _state: &DuelState, rng: &mut GameRng) -> i32 {
        rng.gen_range(0..7)
    }
}

/// Baseline-heuristic continuation. Deterministic; ignores the rng.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicRollout;

impl RolloutPolicy for HeuristicRollout {
    fn decide(&self, state: &DuelState, _rng: &mut GameRng) -> i32 {
        let mut policy = BaselinePolicy::new();
        Policy::decide(&mut policy, state)
    }
}

/// Decision policy that evaluates each legal action by rollout.
#[derive(Clone, Debug)]
pub struct RolloutSearch<R: RolloutPolicy = HeuristicRollout> {
    trials: u32,
    rng: GameRng,
    sub_policy: R,
}

impl RolloutSearch<HeuristicRollout> {
    /// Rollout search with the baseline-heuristic continuation.
    ///
    /// ## Panics
    ///
    /// Panics if `trials` is zero.
    #[must_use]
    pub fn new(trials: u32, seed: u64) -> Self {
        Self::with_sub_policy(trials, seed, HeuristicRollout)
    }
}

impl<R: RolloutPolicy> RolloutSearch<R> {
    /// Rollout search with an explicit continuation policy.
    ///
    /// ## Panics
    ///
    /// Panics if `trials` is zero.
    #[must_use]
    pub fn with_sub_policy(trials: u32, seed: u64, sub_policy: R) -> Self {
        assert!(trials > 0, "rollout search needs at least one trial");
        Self {
            trials,
            rng: GameRng::new(seed),
            sub_policy,
        }
    }

    /// Number of trials per candidate action.
    #[must_use]
    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Mean terminal score of one candidate action, from the mover's
    /// perspective.
    fn evaluate(&mut self, state: &DuelState, code: i32) -> f64 {
        let mover = state.turn;
        let mut total: i64 = 0;

        for _ in 0..self.trials {
            let mut trial_rng = self.rng.fork();
            let mut trial = state.clone();
            resolve(&mut trial, code);
            total += i64::from(play_out(trial, |s| self.sub_policy.decide(s, &mut trial_rng)));
        }

        let mean = total as f64 / f64::from(self.trials);
        // The score is hp0 - hp1; flip it for player 1.
        if mover == PlayerId::new(1) {
            -mean
        } else {
            mean
        }
    }
}

impl<R: RolloutPolicy> Policy for RolloutSearch<R> {
    fn decide(&mut self, state: &DuelState) -> i32 {
        // Shooting is always legal, so the candidate set is never empty.
        let candidates = legal_actions(state);

        let mut best_code = candidates[0].code();
        let mut best_value = f64::NEG_INFINITY;

        for action in candidates {
            let value = self.evaluate(state, action.code());
            // Strictly greater: ties keep the earliest (lowest) code.
            if value > best_value {
                best_value = value;
                best_code = action.code();
            }
        }

        best_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DuelConfig;
    use crate::engine::Action;

    #[test]
    fn test_takes_certain_kill() {
        // One real shell, lethal damage: shooting the opponent wins
        // outright, shooting yourself loses outright.
        let config = DuelConfig::new()
            .with_shells(1, 0)
            .with_damage(100)
            .with_item_charges(0)
            .with_starting_player(PlayerId::new(0));
        let state = DuelState::new(&config, 42);

        let mut search = RolloutSearch::new(8, 7);
        assert_eq!(search.decide(&state), Action::ShootOpponent.code());
    }

    #[test]
    fn test_takes_certain_kill_as_player_one() {
        // Same position from the other seat: the sign adjustment must
        // flip the preference with it.
        let config = DuelConfig::new()
            .with_shells(1, 0)
            .with_damage(100)
            .with_item_charges(0)
            .with_starting_player(PlayerId::new(1));
        let state = DuelState::new(&config, 42);

        let mut search = RolloutSearch::new(8, 7);
        assert_eq!(search.decide(&state), Action::ShootOpponent.code());
    }

    #[test]
    fn test_tie_break_keeps_lowest_code() {
        // One fake shell, no items: both shots end a scoreless duel,
        // so both candidates average zero and the tie must resolve to
        // shoot-self (code 0).
        let config = DuelConfig::new()
            .with_shells(0, 1)
            .with_item_charges(0)
            .with_starting_player(PlayerId::new(0));
        let state = DuelState::new(&config, 42);

        let mut search = RolloutSearch::with_sub_policy(1, 7, UniformRollout);
        assert_eq!(search.decide(&state), Action::ShootSelf.code());
    }

    #[test]
    fn test_search_does_not_mutate_state() {
        let config = DuelConfig::default().with_starting_player(PlayerId::new(0));
        let state = DuelState::new(&config, 42);
        let before = state.clone();

        let mut search = RolloutSearch::with_sub_policy(16, 7, UniformRollout);
        let _ = search.decide(&state);

        assert_eq!(state, before);
    }

    #[test]
    fn test_search_deterministic_per_seed() {
        let config = DuelConfig::default().with_starting_player(PlayerId::new(0));
        let state = DuelState::new(&config, 42);

        let mut a = RolloutSearch::with_sub_policy(24, 9, UniformRollout);
        let mut b = RolloutSearch::with_sub_policy(24, 9, UniformRollout);

        assert_eq!(a.decide(&state), b.decide(&state));
    }

    #[test]
    fn test_returns_legal_code() {
        let config = DuelConfig::default();
        for seed in 0..10 {
            let state = DuelState::new(&config, seed);
            let mut search = RolloutSearch::new(4, seed);
            let code = search.decide(&state);

            assert!(legal_actions(&state)
                .iter()
                .any(|action| action.code() == code));
        }
    }

    #[test]
    #[should_panic(expected = "at least one trial")]
    fn test_zero_trials_rejected() {
        let _ = RolloutSearch::new(0, 42);
    }
}
