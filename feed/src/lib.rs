//! RateQuote Feed
//!
//! Everything between the upstream rate feed and the exchange engine.
//!
//! # Features
//!
//! - Decoding of vendor rate records (decimal commas, `/Date(ms)/` stamps)
//! - Grouping of records into one exchanger per currency pair and rate group
//! - Pair filters by currency pair and rate group
//! - Atomic publication of a complete rate snapshot with periodic refresh
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ratequote_feed::{FileRateSource, RateBook};
//!
//! let book = Arc::new(RateBook::new());
//! let source = FileRateSource::new("rates.json");
//! book.refresh(&source).await?;
//!
//! let snapshot = book.current();
//! for pair in snapshot.pairs() {
//!     println!("{}: {:?}", pair, pair.buy(1000.0));
//! }
//! ```

pub mod book;
pub mod error;
pub mod grouping;
pub mod pair;
pub mod record;
pub mod source;

pub use book::{spawn_refresher, BookStats, RateBook, RateSnapshot};
pub use error::{FeedError, FeedResult};
pub use grouping::group_rates;
pub use pair::{filter_pairs, PairExchanger, PairFilter};
pub use record::{FeedItem, FeedResponse};
pub use source::{FileRateSource, RateSource};

#[cfg(any(test, feature = "test-utils"))]
pub use source::MockRateSource;
