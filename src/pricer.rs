// src/pricer.rs
use crate::analytics::bs_analytic;
use crate::config::PricingConfig;
use crate::error::PricerResult;
use crate::mc::greeks::{self, Greeks, GreeksSelection};
use crate::mc::mc_engine::{self, PricingResult};
use crate::rng::NormalRng;

/// Stateful entry point for callers working with [`PricingConfig`]
///
/// Owns the generator used by single-threaded runs, so repeated calls keep
/// drawing from one stream. Parallel runs seed their workers independently.
pub struct MonteCarloPricer {
    rng: NormalRng,
}

impl MonteCarloPricer {
    /// `seed == 0` picks a non-deterministic seed
    pub fn new(seed: u64) -> Self {
        MonteCarloPricer {
            rng: NormalRng::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn price_mc(&mut self, config: &PricingConfig) -> PricerResult<PricingResult> {
        let request = config.to_request()?;
        mc_engine::price(&mut self.rng, &request)
    }

    pub fn price_mc_parallel(&self, config: &PricingConfig) -> PricerResult<PricingResult> {
        let request = config.to_request()?;
        mc_engine::price_parallel(&request)
    }

    pub fn compute_greeks(&mut self, config: &PricingConfig, use_parallel: bool) -> PricerResult<Greeks> {
        self.compute_greeks_selected(config, use_parallel, GreeksSelection::ALL)
    }

    pub fn compute_greeks_selected(
        &mut self,
        config: &PricingConfig,
        use_parallel: bool,
        selection: GreeksSelection,
    ) -> PricerResult<Greeks> {
        let request = config.to_request()?;
        greeks::greeks_selected(&mut self.rng, &request, use_parallel, selection)
    }

    /// Black-Scholes price of the configured option
    pub fn analytical_price(&self, config: &PricingConfig) -> PricerResult<f64> {
        let option_type = config.option_type()?;
        Ok(bs_analytic::analytical_price(&config.model_params(), option_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricerError;

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let config = PricingConfig {
            n_paths: 10_000,
            ..Default::default()
        };
        let a = MonteCarloPricer::new(42).price_mc(&config).unwrap();
        let b = MonteCarloPricer::new(42).price_mc(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_consecutive_runs_draw_fresh_paths() {
        let config = PricingConfig {
            n_paths: 10_000,
            ..Default::default()
        };
        let mut pricer = MonteCarloPricer::new(42);
        let first = pricer.price_mc(&config).unwrap();
        let second = pricer.price_mc(&config).unwrap();
        assert_ne!(first.price, second.price);
    }

    #[test]
    fn test_bad_option_type_raises_before_pricing() {
        let config = PricingConfig {
            option_type: "chooser".to_string(),
            ..Default::default()
        };
        let mut pricer = MonteCarloPricer::new(1);
        assert!(matches!(pricer.price_mc(&config), Err(PricerError::InvalidOptionType { .. })));
        assert!(pricer.price_mc_parallel(&config).is_err());
        assert!(pricer.compute_greeks(&config, false).is_err());
        assert!(pricer.analytical_price(&config).is_err());
    }

    #[test]
    fn test_analytical_price() {
        let pricer = MonteCarloPricer::new(1);
        let call = pricer.analytical_price(&PricingConfig::default()).unwrap();
        assert!((call - 10.4506).abs() < 1e-4);
    }
}
