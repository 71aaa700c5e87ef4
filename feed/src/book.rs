//! Published rate snapshots.
//!
//! A refresh builds a complete replacement snapshot off to the side and then
//! swaps a single `Arc`. Readers holding the previous snapshot keep using it
//! undisturbed; new readers see the new one. No pair is ever updated in place.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use ratequote_common::{CurrencyPair, RateGroup};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::error::FeedResult;
use crate::grouping::group_rates;
use crate::pair::{filter_pairs, PairExchanger, PairFilter};
use crate::source::RateSource;

/// A complete, immutable set of pair exchangers from one fetch.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pairs: Vec<PairExchanger>,
    fetched_at: DateTime<Utc>,
    source: String,
}

impl RateSnapshot {
    pub fn new(pairs: Vec<PairExchanger>, source: impl Into<String>) -> Self {
        Self {
            pairs,
            fetched_at: Utc::now(),
            source: source.into(),
        }
    }

    /// Snapshot with no pairs, published before the first refresh.
    pub fn empty() -> Self {
        Self::new(Vec::new(), "none")
    }

    pub fn pairs(&self) -> &[PairExchanger] {
        &self.pairs
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Find the exchanger for a pair within a group.
    pub fn find(&self, pair: &CurrencyPair, group: &RateGroup) -> Option<&PairExchanger> {
        self.pairs
            .iter()
            .find(|p| p.pair() == pair && p.group() == group)
    }

    /// All groups' exchangers for a pair.
    pub fn quotes_for(&self, pair: &CurrencyPair) -> Vec<&PairExchanger> {
        self.filter(&[PairFilter::Pairs(vec![pair.clone()])])
    }

    pub fn filter(&self, filters: &[PairFilter]) -> Vec<&PairExchanger> {
        filter_pairs(&self.pairs, filters)
    }
}

/// Holds the currently published snapshot.
pub struct RateBook {
    current: RwLock<Arc<RateSnapshot>>,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

impl RateBook {
    /// Create a book publishing an empty snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(RateSnapshot::empty())),
            refreshes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Get the published snapshot.
    pub fn current(&self) -> Arc<RateSnapshot> {
        self.current.read().clone()
    }

    /// Replace the published snapshot.
    pub fn publish(&self, snapshot: RateSnapshot) -> Arc<RateSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write() = snapshot.clone();
        snapshot
    }

    /// Fetch, group and publish. On failure the previous snapshot stays.
    #[instrument(skip_all, fields(source = %source.name()))]
    pub async fn refresh(&self, source: &dyn RateSource) -> FeedResult<Arc<RateSnapshot>> {
        match Self::load(source).await {
            Ok(snapshot) => {
                self.refreshes.fetch_add(1, Ordering::Relaxed);
                let snapshot = self.publish(snapshot);
                info!(pairs = snapshot.len(), "Published rate snapshot");
                Ok(snapshot)
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "Rate refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    async fn load(source: &dyn RateSource) -> FeedResult<RateSnapshot> {
        let response = source.fetch().await?;
        let pairs = group_rates(&response)?;
        Ok(RateSnapshot::new(pairs, source.name()))
    }

    /// Get refresh statistics.
    pub fn stats(&self) -> BookStats {
        BookStats {
            pairs: self.current().len(),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for RateBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Refresh statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookStats {
    pub pairs: usize,
    pub refreshes: u64,
    pub failures: u64,
}

/// Refresh `book` from `source` every `period` until `shutdown` turns true
/// or its sender is dropped. The first refresh runs immediately.
pub fn spawn_refresher(
    book: Arc<RateBook>,
    source: Arc<dyn RateSource>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are logged by refresh and retried next tick.
                    let _ = book.refresh(source.as_ref()).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!(source = source.name(), "Rate refresher stopped");
    })
}
