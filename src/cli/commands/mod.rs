//! Subcommands of the `blackjack` binary

pub mod play;
pub mod train;

/// Seed offset for evaluation and play environments, so they never replay
/// the training deck (`seed`) or the exploration stream (`seed + 1`).
pub(crate) const EVALUATION_SEED_OFFSET: u64 = 2;

pub(crate) fn evaluation_seed(training_seed: Option<u64>) -> Option<u64> {
    training_seed.map(|seed| seed.wrapping_add(EVALUATION_SEED_OFFSET))
}
