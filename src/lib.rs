//! # mc-pricer: Monte Carlo Pricing of European Options
//!
//! Statistical estimates of Black-Scholes option prices and their Greeks,
//! with a closed-form reference to compare against.
//!
//! ## Key Features
//!
//! - **Exact terminal sampling**: S_T drawn from the log-normal law of GBM, no time stepping
//! - **Variance Reduction**: Antithetic variates and control variates (β = 1)
//! - **Parallel Workers**: Independently seeded workers on Rayon, merged after a barrier join
//! - **Confidence Intervals**: 90/95/99% two-sided intervals from the standard error
//! - **Finite-Difference Greeks**: Delta, Gamma, Vega, Theta, Rho by bump-and-reprice
//!
//! ## Quick Start
//!
//! ```rust
//! use mc_pricer::{MonteCarloPricer, PricingConfig};
//!
//! let config = PricingConfig {
//!     n_paths: 100_000,
//!     option_type: "call".to_string(),
//!     ..Default::default()
//! };
//!
//! let mut pricer = MonteCarloPricer::new(42);
//! let result = pricer.price_mc(&config).expect("Valid configuration");
//! println!(
//!     "Option price: {:.4} ± {:.4}  CI [{:.4}, {:.4}]",
//!     result.price, result.std_error, result.ci_lower, result.ci_upper
//! );
//! ```
//!
//! ## Engine Layer
//!
//! [`mc::price`] and [`mc::price_parallel`] take a typed [`mc::PricingRequest`]
//! directly; [`MonteCarloPricer`] and [`PricingConfig`] wrap them for callers
//! that carry option types as strings.
//!
//! The library emits `tracing` events and never installs a subscriber.

// Module declarations
pub mod analytics;
pub mod config;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod pricer;
pub mod rng;

// Re-export commonly used types for convenience
pub use config::PricingConfig;
pub use error::{PricerError, PricerResult};
pub use mc::{Greeks, GreeksSelection, OptionType, Payoff, PricingRequest, PricingResult};
pub use models::ModelParams;
pub use pricer::MonteCarloPricer;
