// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! # Design Philosophy
//!
//! Monte Carlo pricing needs random numbers with specific properties:
//! 1. **Reproducibility**: Same seed → same sequence (critical for debugging/validation)
//! 2. **Parallel safety**: Each worker owns its own generator, nothing is shared
//! 3. **Performance**: Batch generation into caller-owned buffers
//!
//! # Scalar vs Batch
//!
//! `fill_normal` samples the same distribution object in the same order as
//! repeated `normal()` calls, so for a given seed the batch and scalar paths
//! yield bit-for-bit identical variates regardless of the batch size used.
//!
//! Normal variates come from `rand_distr::StandardNormal` (Ziggurat).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Draws a fresh non-zero seed from the thread-local entropy source.
///
/// Used for per-worker seeds in parallel runs and for `NormalRng::new(0)`.
pub fn entropy_seed() -> u64 {
    rand::thread_rng().gen::<u64>().max(1)
}

/// Seeded standard-normal variate source
///
/// # Seeding
///
/// A seed of zero passed to [`NormalRng::new`] means "pick a seed from a
/// non-deterministic source". The chosen seed is kept and reported by
/// [`NormalRng::seed`]. [`NormalRng::reseed`] takes its argument literally.
#[derive(Debug, Clone)]
pub struct NormalRng {
    inner: StdRng,
    seed: u64,
}

impl NormalRng {
    pub fn new(seed: u64) -> Self {
        let seed = if seed == 0 { entropy_seed() } else { seed };
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Restart the sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.inner = StdRng::seed_from_u64(seed);
        self.seed = seed;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform variate in [0, 1). Not used by the pricing hot path.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    #[inline]
    pub fn normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    pub fn normal_vector(&mut self, n: usize) -> Vec<f64> {
        let mut out = vec![0.0; n];
        self.fill_normal(&mut out);
        out
    }

    /// Fill `buffer` with standard normal variates, in draw order
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }

    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }
}
