pub mod greeks;
pub mod kernel;
pub mod mc_engine;
pub mod payoffs;
pub mod summary;
pub mod worker;

pub use greeks::{Greeks, GreeksSelection};
pub use mc_engine::{price, price_parallel, PricingRequest, PricingResult};
pub use payoffs::{OptionType, Payoff};
