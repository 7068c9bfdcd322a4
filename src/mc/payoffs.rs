//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! - **Call**: max(S_T - K, 0) - right to buy at strike K
//! - **Put**: max(K - S_T, 0) - right to sell at strike K
//!
//! Payoffs are evaluated once, on the terminal price. They are plain `Copy`
//! values, so workers share them by reference with no synchronisation.

use crate::error::{PricerError, PricerResult};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Parse an option-type string, naming `context` in the error
    pub fn parse(value: &str, context: &str) -> PricerResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricerError::InvalidOptionType {
                value: value.to_string(),
                context: context.to_string(),
            }),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionType::parse(s, "option_type")
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// European payoff on the terminal price
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },
}

impl Payoff {
    pub fn new(option_type: OptionType, k: f64) -> Self {
        match option_type {
            OptionType::Call => Payoff::EuropeanCall { k },
            OptionType::Put => Payoff::EuropeanPut { k },
        }
    }

    pub fn call(k: f64) -> Self {
        Payoff::EuropeanCall { k }
    }

    pub fn put(k: f64) -> Self {
        Payoff::EuropeanPut { k }
    }

    pub fn strike(&self) -> f64 {
        match *self {
            Payoff::EuropeanCall { k } | Payoff::EuropeanPut { k } => k,
        }
    }

    pub fn option_type(&self) -> OptionType {
        match self {
            Payoff::EuropeanCall { .. } => OptionType::Call,
            Payoff::EuropeanPut { .. } => OptionType::Put,
        }
    }

    /// Cash payoff at maturity for terminal price `spot`
    #[inline]
    pub fn evaluate(&self, spot: f64) -> f64 {
        match *self {
            Payoff::EuropeanCall { k } => (spot - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - spot).max(0.0),
        }
    }
}
