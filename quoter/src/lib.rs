//! RateQuote Quoter
//!
//! Configuration and plain-text rendering for the `quoter` binary.

pub mod config;
pub mod render;

pub use config::{ConfigError, QuoterConfig};
