//! Distribution error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while decoding a raw analytic distribution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistributionError {
    /// The raw value is not a JSON object.
    #[error("Analytic distribution must be a JSON object, got {0}")]
    NotAnObject(String),

    /// A key does not name an analytic account.
    #[error("Invalid analytic account key '{0}'")]
    InvalidAccountKey(String),

    /// A value is not a number.
    #[error("Invalid percentage for '{key}': {value}")]
    InvalidPercentage {
        /// Distribution key.
        key: String,
        /// Raw value.
        value: String,
    },

    /// A percentage lies outside 0..=100.
    #[error("Percentage {percentage} for '{key}' is outside 0..=100")]
    PercentageOutOfRange {
        /// Distribution key.
        key: String,
        /// Decoded percentage.
        percentage: Decimal,
    },
}
