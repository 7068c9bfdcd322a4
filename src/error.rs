// src/error.rs
use thiserror::Error;

/// Error types for the mc-pricer library
///
/// Only structurally invalid configuration raises. Degenerate numeric input
/// (zero paths, zero volatility, expired options) is handled by defined
/// fallbacks inside the engine and never reaches this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricerError {
    /// Unrecognised option-type string
    #[error("Unknown option type '{value}' for {context}: expected 'call' or 'put'")]
    InvalidOptionType { value: String, context: String },

    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Worker pool for a parallel run could not be created
    #[error("Failed to start {threads} worker threads: {reason}")]
    ThreadPool { threads: usize, reason: String },
}

/// Result type alias for mc-pricer operations
pub type PricerResult<T> = Result<T, PricerError>;

/// Validation utilities
pub mod validation {
    use super::{PricerError, PricerResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> PricerResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(PricerError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricerResult<()> {
        if !value.is_finite() {
            Err(PricerError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
