//! The run's single seeded random source.
//!
//! A run owns exactly one `SimRng`, seeded from `RouteConfig::seed`, and
//! threads it by `&mut` through every stochastic call.  Nothing in the
//! engine draws from ambient or thread-local randomness, so two runs with
//! the same seed and the same event order make the same draws in the same
//! order.
//!
//! Replications never share a generator: each derives its own seed with
//! [`replication_seed`].

use rand::rngs::SmallRng;
use rand::distributions::Distribution;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed for replication `index` of a batch rooted at `base_seed`.
///
/// Index 0 maps to `base_seed` itself.
#[inline]
pub fn replication_seed(base_seed: u64, index: u64) -> u64 {
    base_seed ^ index.wrapping_mul(MIXING_CONSTANT)
}

/// Simulation-level RNG.  Parallel replications each build their own.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// Draw one value from any `rand` / `rand_distr` distribution.
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        self.0.sample(dist)
    }
}
