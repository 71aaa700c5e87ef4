//! Exchange engine error types.

use thiserror::Error;

/// Errors that can occur when building or querying an exchanger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    /// Invalid construction input, such as an empty tier list.
    ///
    /// This is a programming error on the caller's side and is never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The queried amount is negative (or not a number).
    #[error("Negative amount")]
    NegativeAmount,

    /// The amount is below the minimum of every tier for the requested side.
    #[error("No rate tier applies to the amount")]
    NoApplicableTier,
}

impl ExchangeError {
    /// Check if the caller can recover by supplying a different amount.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExchangeError::NegativeAmount | ExchangeError::NoApplicableTier
        )
    }
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
