// src/models/gbm.rs
//! Geometric Brownian Motion under the risk-neutral measure
//!
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! S_T  = S_0 * exp((r - σ²/2)T + σ√T * Z),   Z ~ N(0,1)
//! ```
//!
//! Pricing only needs the terminal distribution. [`PathSimulator::simulate_path`]
//! is a utility for inspecting whole paths and is not used by the engine.

use crate::error::validation::{validate_finite, validate_positive};
use crate::error::PricerResult;
use crate::rng::NormalRng;

/// Black-Scholes model and contract inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Spot price
    pub s0: f64,
    /// Strike price
    pub k: f64,
    /// Risk-free rate
    pub r: f64,
    /// Volatility
    pub sigma: f64,
    /// Time to maturity in years
    pub t: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams {
            s0: 100.0,
            k: 100.0,
            r: 0.05,
            sigma: 0.2,
            t: 1.0,
        }
    }
}

impl ModelParams {
    pub fn new(s0: f64, k: f64, r: f64, sigma: f64, t: f64) -> Self {
        ModelParams { s0, k, r, sigma, t }
    }

    /// Reject structurally invalid inputs.
    ///
    /// Zero or negative `sigma` and `t` are accepted: the engine and the
    /// analytical reference both have deterministic fallbacks for them.
    pub fn validate(&self) -> PricerResult<()> {
        validate_positive("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_finite("r", self.r)?;
        validate_finite("sigma", self.sigma)?;
        validate_finite("t", self.t)?;
        Ok(())
    }

    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }
}

pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Gbm { mu, sigma }
    }

    /// Exact log-normal transition over `dt`
    #[inline]
    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.max(0.0).sqrt() * normal_draw)
            .exp()
    }
}

/// Draws terminal prices or full paths from one private generator
pub struct PathSimulator<'a> {
    rng: &'a mut NormalRng,
}

impl<'a> PathSimulator<'a> {
    pub fn new(rng: &'a mut NormalRng) -> Self {
        PathSimulator { rng }
    }

    pub fn simulate_terminal(&mut self, params: &ModelParams) -> f64 {
        let z = self.rng.normal();
        Gbm::new(params.r, params.sigma).exact_step(params.s0, params.t, z)
    }

    /// Returns `steps + 1` prices, starting with S0
    pub fn simulate_path(&mut self, params: &ModelParams, steps: usize) -> Vec<f64> {
        let mut path = Vec::with_capacity(steps + 1);
        path.push(params.s0);

        if steps == 0 {
            return path;
        }

        let gbm = Gbm::new(params.r, params.sigma);
        let dt = params.t / steps as f64;
        let mut s = params.s0;
        for _ in 0..steps {
            s = gbm.exact_step(s, dt, self.rng.normal());
            path.push(s);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_rejects_bad_spot_and_strike() {
        assert!(ModelParams::default().validate().is_ok());
        assert!(ModelParams { s0: 0.0, ..Default::default() }.validate().is_err());
        assert!(ModelParams { k: -1.0, ..Default::default() }.validate().is_err());
        assert!(ModelParams { r: f64::NAN, ..Default::default() }.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_degenerate_vol_and_maturity() {
        let params = ModelParams { sigma: 0.0, t: 0.0, ..Default::default() };
        assert!(params.validate().is_ok());
        let params = ModelParams { sigma: -0.1, t: -1.0, ..Default::default() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_vol_step_is_deterministic_forward() {
        let gbm = Gbm::new(0.05, 0.0);
        let s = gbm.exact_step(100.0, 1.0, 3.7);
        assert_relative_eq!(s, 100.0 * 0.05f64.exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_path_shape() {
        let mut rng = NormalRng::new(11);
        let mut sim = PathSimulator::new(&mut rng);
        let params = ModelParams::default();

        let path = sim.simulate_path(&params, 252);
        assert_eq!(path.len(), 253);
        assert_eq!(path[0], params.s0);
        assert!(path.iter().all(|&s| s > 0.0));

        assert_eq!(sim.simulate_path(&params, 0), vec![params.s0]);
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        let mut rng = NormalRng::new(5);
        let mut sim = PathSimulator::new(&mut rng);
        let params = ModelParams::default();

        let n = 200_000;
        let mean = (0..n).map(|_| sim.simulate_terminal(&params)).sum::<f64>() / n as f64;
        let forward = params.s0 * (params.r * params.t).exp();

        assert!(
            (mean - forward).abs() / forward < 0.005,
            "Terminal mean {} too far from forward {}",
            mean,
            forward
        );
    }
}
