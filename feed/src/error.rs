//! Feed error types.

use std::path::PathBuf;

use ratequote_common::CommonError;
use ratequote_exchange::ExchangeError;
use thiserror::Error;

/// Errors that can occur between the rate source and the engine.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Reading a feed document failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The feed document is not valid JSON for the expected shape.
    #[error("Failed to decode feed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A numeric field could not be parsed.
    #[error("Invalid rate value: {0:?}")]
    InvalidValue(String),

    /// A timestamp field could not be parsed.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// A currency code could not be split into a pair.
    #[error("Invalid currency code: {0}")]
    Pair(#[from] CommonError),

    /// Tier data rejected by the engine.
    #[error("Invalid rate tier: {0}")]
    Exchange(#[from] ExchangeError),

    /// The source has nothing to serve.
    #[error("Rate source {0} unavailable")]
    SourceUnavailable(String),
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
