//! Duel state: the chamber, both players, and the transient marks.
//!
//! `DuelState` is a fixed-shape struct mutated only by the resolver in
//! `engine::resolver`. It is exclusively owned by the loop driving it;
//! speculative play (rollout search) works on wholesale clones, never on
//! shared references. `Clone` is total and value-semantic: a clone owns
//! its own chamber and counters with no aliasing back to the live duel.
//!
//! Hp is clamped to `max_hp` on heal only. Damage may push it below
//! zero, where it is read as a loss condition rather than re-clamped.

use serde::{Deserialize, Serialize};

use super::config::DuelConfig;
use super::player::{PlayerId, PlayerPair};
use super::rng::GameRng;

/// One chamber entry. Immutable once resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shell {
    /// Real shells damage their target; fake shells are harmless.
    pub real: bool,
    /// Set by the reveal item; public knowledge from then on.
    pub revealed: bool,
}

impl Shell {
    /// A freshly loaded, unrevealed shell.
    #[must_use]
    pub const fn new(real: bool) -> Self {
        Self {
            real,
            revealed: false,
        }
    }
}

/// Complete state of one duel in progress.
///
/// Invariants maintained by the resolver:
/// - `position <= chamber.len()`, monotonically non-decreasing
/// - `left_real + left_fake == chamber.len() - position`
/// - `hp[p] <= max_hp` immediately after any heal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuelState {
    /// The shuffled shell sequence. Never reordered after construction.
    pub chamber: Vec<Shell>,

    /// Index of the next unresolved shell.
    pub position: usize,

    /// Unresolved real shells from `position` onward.
    pub left_real: u32,

    /// Unresolved fake shells from `position` onward.
    pub left_fake: u32,

    /// Per-player health. May go negative on a killing shot.
    pub hp: PlayerPair<i32>,

    /// Health cap, enforced on heal.
    pub max_hp: i32,

    /// Damage of one undoubled real shot.
    pub damage_per_shot: i32,

    /// Remaining heal charges.
    pub heal_left: PlayerPair<u8>,

    /// Remaining reveal charges.
    pub reveal_left: PlayerPair<u8>,

    /// Remaining skip-bullet charges.
    pub skip_bullet_left: PlayerPair<u8>,

    /// Remaining skip-round charges.
    pub skip_round_left: PlayerPair<u8>,

    /// Remaining damage-double charges.
    pub double_left: PlayerPair<u8>,

    /// One-shot flag: the next turn pass is suppressed.
    pub skip_round_mark: bool,

    /// One-shot flag: the next real shot deals double damage.
    pub double_mark: bool,

    /// The player to move.
    pub turn: PlayerId,

    /// Illegal decisions absorbed per player. Diagnostic only.
    pub illegal_moves: PlayerPair<u32>,
}

impl DuelState {
    /// Build the initial state for a duel.
    ///
    /// Loads `real_shells` real shells followed by `fake_shells` fake
    /// ones, then applies a uniform permutation from a generator seeded
    /// with `seed`; the same seed always yields the same chamber. The
    /// starting player comes from the same generator unless the config
    /// forces one.
    ///
    /// ## Panics
    ///
    /// Panics if the chamber would be empty or `damage_per_shot` is not
    /// positive. These are configuration bugs, not game outcomes.
    #[must_use]
    pub fn new(config: &DuelConfig, seed: u64) -> Self {
        assert!(
            config.real_shells + config.fake_shells > 0,
            "chamber must hold at least one shell"
        );
        assert!(
            config.damage_per_shot > 0,
            "damage_per_shot must be positive, got {}",
            config.damage_per_shot
        );

        let mut rng = GameRng::new(seed);

        let mut chamber = Vec::with_capacity(config.chamber_len());
        chamber.extend((0..config.real_shells).map(|_| Shell::new(true)));
        chamber.extend((0..config.fake_shells).map(|_| Shell::new(false)));
        rng.shuffle(&mut chamber);

        let turn = config
            .starting_player
            .unwrap_or_else(|| PlayerId::new(rng.gen_range(0..2) as u8));

        Self {
            chamber,
            position: 0,
            left_real: config.real_shells,
            left_fake: config.fake_shells,
            hp: PlayerPair::with_value(config.max_hp),
            max_hp: config.max_hp,
            damage_per_shot: config.damage_per_shot,
            heal_left: PlayerPair::with_value(config.heal_charges),
            reveal_left: PlayerPair::with_value(config.reveal_charges),
            skip_bullet_left: PlayerPair::with_value(config.skip_bullet_charges),
            skip_round_left: PlayerPair::with_value(config.skip_round_charges),
            double_left: PlayerPair::with_value(config.double_charges),
            skip_round_mark: false,
            double_mark: false,
            turn,
            illegal_moves: PlayerPair::with_value(0),
        }
    }

    /// The next unresolved shell, or `None` once the chamber is spent.
    #[must_use]
    pub fn current_shell(&self) -> Option<&Shell> {
        self.chamber.get(self.position)
    }

    /// Whether every shell has been resolved or skipped.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.chamber.len()
    }

    /// Number of unresolved shells.
    #[must_use]
    pub fn shells_remaining(&self) -> usize {
        self.chamber.len() - self.position
    }

    /// Probability that the next shell is real, from the public counts.
    ///
    /// The epsilon keeps the exhausted-chamber case finite.
    #[must_use]
    pub fn real_probability(&self) -> f64 {
        f64::from(self.left_real) / (f64::from(self.left_real) + f64::from(self.left_fake) + 1e-10)
    }

    /// The player not currently moving.
    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.turn.other()
    }
}
