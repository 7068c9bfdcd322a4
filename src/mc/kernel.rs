// src/mc/kernel.rs
//! Sampling kernel: terminal prices, payoffs and partial sums
//!
//! # Terminal Distribution
//!
//! ```text
//! S_T = S_0 * exp(drift + scale * Z)
//! drift = (r - σ²/2)T,   scale = σ√T,   Z ~ N(0,1)
//! ```
//!
//! Both constants and the discount factor e^(-rT) are computed once when the
//! kernel is built. Negative σ or T are clamped to zero, which reproduces the
//! deterministic and intrinsic branches of the analytical reference.
//!
//! # Antithetic Pairing
//!
//! A pair uses Z and -Z and records the average of the two discounted payoffs
//! as one estimate, so n paths give ⌈n/2⌉ independent estimates. With an odd
//! path count the last path is recorded on its own.
//!
//! # Batched Variant
//!
//! [`SamplingKernel::run_batched`] draws `BATCH_SIZE` normals at a time and
//! evaluates terminal prices and payoffs as whole-array operations before
//! reducing. It consumes the generator in the same order as
//! [`SamplingKernel::run`], so for equal seeds the two differ only by
//! floating-point summation order.

use crate::mc::payoffs::Payoff;
use crate::mc::summary::{PartialSummary, Sample};
use crate::models::ModelParams;
use crate::rng::NormalRng;
use ndarray::{Array1, ArrayView1};

/// Normals drawn per block in the batched loop
pub const BATCH_SIZE: usize = 512;

/// Number of independent estimates produced from `n_paths` paths
#[inline]
pub fn effective_samples(n_paths: usize, use_antithetic: bool) -> usize {
    if use_antithetic {
        n_paths / 2 + n_paths % 2
    } else {
        n_paths
    }
}

/// Read-only per-run state shared by every worker
#[derive(Debug, Clone, Copy)]
pub struct SamplingKernel {
    s0: f64,
    drift: f64,
    diffusion_scale: f64,
    discount: f64,
    payoff: Payoff,
    control: Option<Payoff>,
    use_antithetic: bool,
}

impl SamplingKernel {
    pub fn new(
        params: &ModelParams,
        payoff: Payoff,
        control: Option<Payoff>,
        use_antithetic: bool,
    ) -> Self {
        let sigma = params.sigma.max(0.0);
        let t = params.t.max(0.0);
        SamplingKernel {
            s0: params.s0,
            drift: (params.r - 0.5 * sigma * sigma) * t,
            diffusion_scale: sigma * t.sqrt(),
            discount: (-params.r * t).exp(),
            payoff,
            control,
            use_antithetic,
        }
    }

    pub fn use_antithetic(&self) -> bool {
        self.use_antithetic
    }

    pub fn has_control(&self) -> bool {
        self.control.is_some()
    }

    #[inline]
    pub fn terminal_price(&self, z: f64) -> f64 {
        self.s0 * (self.drift + self.diffusion_scale * z).exp()
    }

    /// One unpaired path. The control payoff reads the same terminal price.
    #[inline]
    pub fn sample(&self, z: f64) -> Sample {
        let st = self.terminal_price(z);
        Sample {
            value: self.discount * self.payoff.evaluate(st),
            control: self
                .control
                .map_or(0.0, |control| self.discount * control.evaluate(st)),
        }
    }

    /// Average of the paths driven by `z` and `-z`
    #[inline]
    pub fn sample_pair(&self, z: f64) -> Sample {
        let up = self.sample(z);
        let down = self.sample(-z);
        Sample {
            value: 0.5 * (up.value + down.value),
            control: 0.5 * (up.control + down.control),
        }
    }

    /// Scalar loop: one draw per path, or one draw per antithetic pair
    pub fn run(&self, n_paths: usize, rng: &mut NormalRng) -> PartialSummary {
        let mut summary = PartialSummary::default();

        if self.use_antithetic {
            for _ in 0..n_paths / 2 {
                summary.record(self.sample_pair(rng.normal()));
            }
            if n_paths % 2 == 1 {
                summary.record(self.sample(rng.normal()));
            }
        } else {
            for _ in 0..n_paths {
                summary.record(self.sample(rng.normal()));
            }
        }

        summary
    }

    /// Same estimates as [`run`](Self::run), evaluated block by block
    pub fn run_batched(&self, n_paths: usize, rng: &mut NormalRng) -> PartialSummary {
        let mut summary = PartialSummary::default();
        let draws = if self.use_antithetic { n_paths / 2 } else { n_paths };
        let mut buffer = vec![0.0; BATCH_SIZE];

        let mut remaining = draws;
        while remaining > 0 {
            let len = remaining.min(BATCH_SIZE);
            rng.fill_normal(&mut buffer[..len]);
            self.record_block(ArrayView1::from(&buffer[..len]), &mut summary);
            remaining -= len;
        }

        if self.use_antithetic && n_paths % 2 == 1 {
            summary.record(self.sample(rng.normal()));
        }

        summary
    }

    fn record_block(&self, z: ArrayView1<f64>, summary: &mut PartialSummary) {
        let (values, controls) = if self.use_antithetic {
            let up = z.mapv(|z| self.terminal_price(z));
            let down = z.mapv(|z| self.terminal_price(-z));
            let values = (self.discounted(&up, &self.payoff) + self.discounted(&down, &self.payoff)) * 0.5;
            let controls = self.control.map(|control| {
                (self.discounted(&up, &control) + self.discounted(&down, &control)) * 0.5
            });
            (values, controls)
        } else {
            let st = z.mapv(|z| self.terminal_price(z));
            let values = self.discounted(&st, &self.payoff);
            let controls = self.control.map(|control| self.discounted(&st, &control));
            (values, controls)
        };

        summary.record_batch(values.view(), controls.as_ref().map(|c| c.view()));
    }

    #[inline]
    fn discounted(&self, terminal: &Array1<f64>, payoff: &Payoff) -> Array1<f64> {
        terminal.mapv(|st| self.discount * payoff.evaluate(st))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn kernel(antithetic: bool, control: Option<Payoff>) -> SamplingKernel {
        SamplingKernel::new(&ModelParams::default(), Payoff::call(100.0), control, antithetic)
    }

    #[test]
    fn test_effective_samples() {
        for n in 0..50 {
            assert_eq!(effective_samples(n, false), n);
            assert_eq!(effective_samples(n, true), (n + 1) / 2);
        }
    }

    #[test]
    fn test_scalar_counts_match_effective_samples() {
        let mut rng = NormalRng::new(1);
        for &n in &[0usize, 1, 2, 7, 10] {
            assert_eq!(kernel(true, None).run(n, &mut rng).count, effective_samples(n, true));
            assert_eq!(kernel(false, None).run(n, &mut rng).count, n);
        }
    }

    #[test]
    fn test_batched_matches_scalar() {
        for &antithetic in &[false, true] {
            for &n in &[1usize, 2, 511, 1025, 3001] {
                let k = kernel(antithetic, Some(Payoff::call(95.0)));
                let scalar = k.run(n, &mut NormalRng::new(17));
                let batched = k.run_batched(n, &mut NormalRng::new(17));

                assert_eq!(scalar.count, batched.count);
                assert_relative_eq!(scalar.sum, batched.sum, max_relative = 1e-10);
                assert_relative_eq!(scalar.sum_sq, batched.sum_sq, max_relative = 1e-10);
                assert_relative_eq!(scalar.control_sum, batched.control_sum, max_relative = 1e-10);
                assert_relative_eq!(
                    scalar.diff_sum_sq,
                    batched.diff_sum_sq,
                    max_relative = 1e-9,
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_pair_is_average_of_mirrored_paths() {
        let k = kernel(true, None);
        let pair = k.sample_pair(0.8);
        let expected = 0.5 * (k.sample(0.8).value + k.sample(-0.8).value);
        assert_eq!(pair.value, expected);
    }

    #[test]
    fn test_identical_control_tracks_value() {
        let k = kernel(false, Some(Payoff::call(100.0)));
        let summary = k.run(1000, &mut NormalRng::new(3));
        assert_eq!(summary.sum, summary.control_sum);
        assert_eq!(summary.diff_sum_sq, 0.0);
    }

    #[test]
    fn test_degenerate_inputs_are_deterministic() {
        let params = ModelParams { sigma: 0.0, ..Default::default() };
        let k = SamplingKernel::new(&params, Payoff::call(100.0), None, false);
        let forward = params.s0 * (params.r * params.t).exp();
        assert_relative_eq!(k.terminal_price(2.5), forward, max_relative = 1e-12);

        let expired = ModelParams { t: -0.5, ..Default::default() };
        let k = SamplingKernel::new(&expired, Payoff::put(110.0), None, true);
        let s = k.sample_pair(1.3);
        assert_eq!(s.value, 10.0);
    }
}
