//! Error types for shared value parsing.

use thiserror::Error;

/// Errors raised while parsing shared value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// A currency code string contains more than two currencies.
    #[error("Too many currencies in {0:?}")]
    MalformedPair(String),

    /// An empty currency code.
    #[error("Empty currency code")]
    EmptyCurrency,
}

/// Result type alias for shared value parsing.
pub type Result<T> = std::result::Result<T, CommonError>;
