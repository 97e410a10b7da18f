//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
///
/// Two generators created from the same seed produce identical streams,
/// which is what makes whole runs replayable.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
