//! Batch evaluation and dataset collection.
//!
//! `play_many` pits two policies over a block of seeded duels and
//! aggregates win/draw rates, mean score, and absorbed illegal moves.
//! `collect_samples` generates
//! imitation-learning data: randomized duels between policies drawn
//! from a pool, keeping the winner's `(features, action)` pairs.

use serde::{Deserialize, Serialize};

use crate::core::{DuelConfig, DuelState, GameRng, PlayerId, PlayerPair};
use crate::engine::{run_duel, score, DuelOutcome, Policy, TurnRecord};
use crate::features;

/// Aggregate results of a block of duels.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchStats {
    /// Duels played.
    pub games: u32,
    /// Wins credited to player 0.
    pub wins: u32,
    /// Drawn duels.
    pub draws: u32,
    /// Sum of terminal scores (`hp0 - hp1`).
    pub total_score: i64,
    /// Illegal decisions absorbed, per seat.
    pub illegal_moves: PlayerPair<u64>,
}

impl MatchStats {
    /// Fold one finished duel into the stats.
    pub fn record(&mut self, outcome: &DuelOutcome) {
        self.games += 1;
        if outcome.score > 0 {
            self.wins += 1;
        } else if outcome.score == 0 {
            self.draws += 1;
        }
        self.total_score += i64::from(outcome.score);
        for player in PlayerId::both() {
            self.illegal_moves[player] += u64::from(outcome.final_state.illegal_moves[player]);
        }
    }

    /// Fraction of duels won by player 0.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        f64::from(self.wins) / f64::from(self.games.max(1))
    }

    /// Fraction of drawn duels.
    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        f64::from(self.draws) / f64::from(self.games.max(1))
    }

    /// Mean terminal score across the block.
    #[must_use]
    pub fn mean_score(&self) -> f64 {
        self.total_score as f64 / f64::from(self.games.max(1))
    }

    /// Mean illegal decisions per duel for one seat.
    #[must_use]
    pub fn mean_illegal(&self, player: PlayerId) -> f64 {
        self.illegal_moves[player] as f64 / f64::from(self.games.max(1))
    }
}

/// Play `games` duels of the same configuration, seeding duel `i` with
/// `seed0 + i`, and aggregate the outcomes.
pub fn play_many(
    config: &DuelConfig,
    first: &mut dyn Policy,
    second: &mut dyn Policy,
    games: u32,
    seed0: u64,
) -> MatchStats {
    let mut stats = MatchStats::default();

    for i in 0..games {
        let state = DuelState::new(config, seed0 + u64::from(i));
        let outcome = run_duel(state, &mut *first, &mut *second);
        stats.record(&outcome);
    }

    stats
}

/// One imitation-learning sample: what the eventual winner saw, and
/// what it did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Feature vector of the pre-decision snapshot.
    pub features: Vec<f64>,
    /// The action code the winner chose.
    pub action: i32,
}

impl Sample {
    fn from_record(record: &TurnRecord) -> Self {
        Self {
            features: features::extract(&record.state).to_vec(),
            action: record.action,
        }
    }
}

/// Extract the winning side's `(features, action)` pairs from a duel.
///
/// Draws contribute nothing: with no winner there is no side worth
/// imitating.
#[must_use]
pub fn winner_samples(outcome: &DuelOutcome) -> Vec<Sample> {
    match outcome.winner() {
        Some(winner) => outcome.logs[winner].iter().map(Sample::from_record).collect(),
        None => Vec::new(),
    }
}

/// Collect winner samples from `rounds` randomized duels.
///
/// Each round draws a duel configuration (shell counts 1..=10, item
/// charges 0..=2, damage from an even hp division) and two seats from
/// the pool, with replacement, all from one seeded generator; the
/// whole dataset is reproducible from `seed`.
pub fn collect_samples(pool: &mut [Box<dyn Policy>], rounds: u32, seed: u64) -> Vec<Sample> {
    assert!(!pool.is_empty(), "policy pool must not be empty");

    let mut rng = GameRng::new(seed);
    let mut samples = Vec::new();

    for _ in 0..rounds {
        let config = random_config(&mut rng);
        let seats = [
            rng.gen_range_usize(0..pool.len()),
            rng.gen_range_usize(0..pool.len()),
        ];
        let duel_seed = rng.gen_range(0..100_000) as u64;

        let state = DuelState::new(&config, duel_seed);
        let outcome = run_pooled(state, pool, seats);
        samples.extend(winner_samples(&outcome));
    }

    samples
}

/// Draw a randomized duel configuration for dataset variety.
fn random_config(rng: &mut GameRng) -> DuelConfig {
    DuelConfig::new()
        .with_shells(
            rng.gen_range(1..11) as u32,
            rng.gen_range(1..11) as u32,
        )
        .with_damage(100 / rng.gen_range(2..11) + 1)
        .with_heal(rng.gen_range(0..3) as u8)
        .with_reveal(rng.gen_range(0..3) as u8)
        .with_skip_round(rng.gen_range(0..3) as u8)
        .with_skip_bullet(rng.gen_range(0..3) as u8)
        .with_double(rng.gen_range(0..3) as u8)
}

/// Run one duel with seats assigned by pool index.
///
/// Both seats may point at the same pool entry; only the mover's policy
/// is borrowed at any moment, so a single policy can play itself.
fn run_pooled(
    mut state: DuelState,
    pool: &mut [Box<dyn Policy>],
    seats: [usize; 2],
) -> DuelOutcome {
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
        let action = pool[seats[mover.index()]].decide(&state);
        logs[mover].push(TurnRecord {
            state: state.clone(),
            action,
        });
        crate::engine::resolve(&mut state, action);
    }
}
