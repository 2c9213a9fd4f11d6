//! Record error types.

use thiserror::Error;

/// Errors raised while interpreting host records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A selection field holds a value this crate does not know.
    #[error("Unknown value '{value}' for field {field}")]
    UnknownSelection {
        /// Host field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
