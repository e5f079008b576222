//! Construction-time domain errors
//!
//! Data model types (assets, debts) validate their invariants at
//! construction rather than relying on callers to check ranges themselves.

use thiserror::Error;

/// Errors raised when constructing a model value outside its declared range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WalletError {
    #[error("{field} must be in [{min}, {max}], got {value}")]
    DomainRangeViolation {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: String },
}
