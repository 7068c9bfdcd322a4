// src/config.rs
//! Caller-facing pricing configuration
//!
//! [`PricingConfig`] is the flat, string-typed shape a CLI or binding layer
//! fills in. [`PricingConfig::to_request`] resolves the option strings and
//! the control variate into an engine [`PricingRequest`], failing before any
//! simulation work if an option type is not recognised.
//!
//! # Control Variate Options
//!
//! - `control_strike`: strike of the control option, `0.0` means "use K"
//! - `control_option_type`: `"auto"` (same as `option_type`), `"call"` or `"put"`
//!
//! A control struck away from K (e.g. a K=95 call controlling a K=100 call)
//! is correlated but not identical, which is where the adjustment helps.

use crate::analytics::bs_analytic;
use crate::error::validation::validate_positive;
use crate::error::PricerResult;
use crate::mc::mc_engine::PricingRequest;
use crate::mc::payoffs::{OptionType, Payoff};
use crate::models::ModelParams;

#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub s0: f64,
    pub k: f64,
    pub r: f64,
    pub sigma: f64,
    pub t: f64,
    pub n_paths: usize,
    pub confidence_level: f64,
    pub use_antithetic: bool,
    pub use_control_variate: bool,
    /// 0 = auto-detect
    pub n_threads: usize,
    /// "call" or "put"
    pub option_type: String,
    /// 0.0 = same strike as the priced option
    pub control_strike: f64,
    /// "auto", "call" or "put"
    pub control_option_type: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            s0: 100.0,
            k: 100.0,
            r: 0.05,
            sigma: 0.2,
            t: 1.0,
            n_paths: 100_000,
            confidence_level: 0.95,
            use_antithetic: true,
            use_control_variate: false,
            n_threads: 0,
            option_type: "call".to_string(),
            control_strike: 0.0,
            control_option_type: "auto".to_string(),
        }
    }
}

impl PricingConfig {
    pub fn model_params(&self) -> ModelParams {
        ModelParams::new(self.s0, self.k, self.r, self.sigma, self.t)
    }

    pub fn option_type(&self) -> PricerResult<OptionType> {
        OptionType::parse(&self.option_type, "option_type")
    }

    /// Control payoff as configured, whether or not the flag is set
    pub fn control_payoff(&self) -> PricerResult<Payoff> {
        let option_type = if self.control_option_type.trim().eq_ignore_ascii_case("auto") {
            self.option_type()?
        } else {
            OptionType::parse(&self.control_option_type, "control_option_type")?
        };
        let strike = if self.control_strike == 0.0 {
            self.k
        } else {
            self.control_strike
        };
        Ok(Payoff::new(option_type, strike))
    }

    /// Check option strings and numeric structure.
    ///
    /// An out-of-range confidence level is not an error; the engine coerces
    /// it and echoes the level it used.
    pub fn validate(&self) -> PricerResult<()> {
        self.model_params().validate()?;
        self.option_type()?;
        if self.use_control_variate {
            let control = self.control_payoff()?;
            validate_positive("control_strike", control.strike())?;
        }
        Ok(())
    }

    /// Resolve into an engine request
    pub fn to_request(&self) -> PricerResult<PricingRequest> {
        self.validate()?;
        let params = self.model_params();

        let (control_payoff, control_analytical) = if self.use_control_variate {
            let control = self.control_payoff()?;
            (Some(control), bs_analytic::analytical_price_for(&control, &params))
        } else {
            (None, 0.0)
        };

        Ok(PricingRequest {
            params,
            option_type: self.option_type()?,
            n_paths: self.n_paths,
            confidence_level: self.confidence_level,
            use_antithetic: self.use_antithetic,
            use_control_variate: self.use_control_variate,
            control_payoff,
            control_analytical,
            n_threads: self.n_threads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricerError;

    #[test]
    fn test_default_request() {
        let request = PricingConfig::default().to_request().unwrap();
        assert_eq!(request.option_type, OptionType::Call);
        assert_eq!(request.n_paths, 100_000);
        assert!(request.control_payoff.is_none());
        assert!(!request.control_applied());
    }

    #[test]
    fn test_unknown_option_type_fails_fast() {
        let config = PricingConfig {
            option_type: "binary".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.to_request(),
            Err(PricerError::InvalidOptionType { ref value, .. }) if value == "binary"
        ));
    }

    #[test]
    fn test_unknown_control_type_only_checked_when_used() {
        let config = PricingConfig {
            control_option_type: "asian".to_string(),
            ..Default::default()
        };
        assert!(config.to_request().is_ok());

        let config = PricingConfig {
            use_control_variate: true,
            ..config
        };
        assert!(matches!(
            config.to_request(),
            Err(PricerError::InvalidOptionType { ref context, .. }) if context == "control_option_type"
        ));
    }

    #[test]
    fn test_control_defaults_to_priced_option() {
        let config = PricingConfig {
            option_type: "put".to_string(),
            use_control_variate: true,
            ..Default::default()
        };
        let request = config.to_request().unwrap();
        assert_eq!(request.control_payoff, Some(Payoff::put(100.0)));
        assert_eq!(
            request.control_analytical,
            bs_analytic::bs_put_price(100.0, 100.0, 0.05, 0.2, 1.0)
        );
    }

    #[test]
    fn test_explicit_control_strike_and_type() {
        let config = PricingConfig {
            use_control_variate: true,
            control_strike: 95.0,
            control_option_type: "Put".to_string(),
            ..Default::default()
        };
        let request = config.to_request().unwrap();
        assert_eq!(request.control_payoff, Some(Payoff::put(95.0)));
    }

    #[test]
    fn test_degenerate_numbers_are_accepted() {
        let config = PricingConfig {
            sigma: 0.0,
            t: 0.0,
            n_paths: 0,
            confidence_level: 3.0,
            ..Default::default()
        };
        assert!(config.to_request().is_ok());
    }
}
