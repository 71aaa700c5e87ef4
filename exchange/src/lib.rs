//! RateQuote Exchange Engine
//!
//! Tiered currency conversion for one currency pair at a time.
//!
//! # Features
//!
//! - Volume tiers: the best tier whose minimum the amount clears wins
//! - Independent buy and sell minimums per tier
//! - Derivation of the reverse pair without re-reading the feed
//!
//! An [`Exchanger`] is immutable once built, so it can be shared between
//! threads and queried concurrently without locking.
//!
//! # Example
//!
//! ```rust
//! use ratequote_exchange::{Exchanger, RateTier, Threshold};
//!
//! let exchanger = Exchanger::build(vec![
//!     RateTier::new(2.0, 3.0, Threshold::uniform(10.0)?)?,
//!     RateTier::new(3.0, 6.0, Threshold::uniform(20.0)?)?,
//! ])?;
//!
//! assert_eq!(exchanger.buy(15.0)?, 30.0);
//! assert_eq!(exchanger.sell(100.0)?, 600.0);
//!
//! let reverse = exchanger.invert();
//! assert!(reverse.buy(100.0).is_ok());
//! # Ok::<(), ratequote_exchange::ExchangeError>(())
//! ```

pub mod error;
pub mod exchanger;
pub mod invert;
pub mod side;
pub mod tier;

pub use error::{ExchangeError, ExchangeResult};
pub use exchanger::Exchanger;
pub use invert::invert;
pub use side::Side;
pub use tier::{RateTier, Threshold, TierSpec, MAX_FACTOR, MIN_FACTOR};
