//! RateQuote Common Types
//!
//! This crate contains the value types shared by the rate engine, the feed
//! and the quoter binary: currency codes, currency pairs and rate groups.

pub mod currency;
pub mod group;
pub mod error;

pub use currency::*;
pub use group::*;
pub use error::*;
