//! Domain validation errors
//!
//! Raised at the data-entry boundary, before anything reaches the store or
//! the aggregation engine.

use thiserror::Error;

/// Result type for domain construction and parsing
pub type Result<T> = std::result::Result<T, DomainError>;

/// Domain validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Amounts and limits are never negative
    #[error("Amount must be non-negative, got {0}")]
    NegativeAmount(String),

    /// Amounts and limits are capped at 99,999,999.99
    #[error("Amount exceeds 99999999.99, got {0}")]
    AmountTooLarge(String),

    /// Amount text could not be parsed as a decimal
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Only `income` and `expense` are recognised
    #[error("Unrecognized transaction type: {0}")]
    InvalidKind(String),

    /// Month text is not `YYYY-MM`
    #[error("Invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    /// Category labels must contain at least one character
    #[error("Category must not be empty")]
    EmptyCategory,
}
