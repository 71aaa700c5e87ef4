//! Tier selection for one currency pair.

use crate::error::{ExchangeError, ExchangeResult};
use crate::side::Side;
use crate::tier::{Outcome, RateTier};

/// Answers buy and sell conversion queries for one currency pair.
///
/// Built once from a non-empty tier list and never mutated afterwards, so a
/// shared reference can be queried from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchanger {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    /// One tier, always active.
    Single(RateTier),
    /// Several tiers with per-side selection order.
    Tiered(Ladder),
}

/// Tiers in feed order plus two index views into them, each sorted by
/// descending minimum for its side.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ladder {
    tiers: Vec<RateTier>,
    by_buy: Vec<usize>,
    by_sell: Vec<usize>,
}

impl Ladder {
    pub(crate) fn new(tiers: Vec<RateTier>) -> Self {
        let by_buy = descending_by_minimum(&tiers, Side::Buy);
        let by_sell = descending_by_minimum(&tiers, Side::Sell);
        Self {
            tiers,
            by_buy,
            by_sell,
        }
    }

    fn order(&self, side: Side) -> &[usize] {
        match side {
            Side::Buy => &self.by_buy,
            Side::Sell => &self.by_sell,
        }
    }

    fn candidates(&self, side: Side) -> impl Iterator<Item = &RateTier> + '_ {
        self.order(side).iter().map(move |&index| &self.tiers[index])
    }
}

/// Stable sort, so tiers with equal minimums keep their feed order and the
/// earlier one is tried first.
fn descending_by_minimum(tiers: &[RateTier], side: Side) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tiers.len()).collect();
    order.sort_by(|&a, &b| tiers[b].minimum(side).total_cmp(&tiers[a].minimum(side)));
    order
}

/// Walk candidates from the highest minimum down and stop at the first tier
/// that accepts the amount.
fn scan<'a>(
    candidates: impl Iterator<Item = &'a RateTier>,
    side: Side,
    amount: f64,
) -> ExchangeResult<(&'a RateTier, f64)> {
    for tier in candidates {
        match tier.exchange(side, amount) {
            Outcome::Converted(value) => return Ok((tier, value)),
            Outcome::InvalidAmount => return Err(ExchangeError::NegativeAmount),
            Outcome::BelowThreshold => continue,
        }
    }
    Err(ExchangeError::NoApplicableTier)
}

impl Exchanger {
    /// Build an exchanger from tiers in feed order.
    ///
    /// A single tier becomes always active regardless of its configured
    /// minimums. An empty list is a configuration error.
    pub fn build(tiers: impl IntoIterator<Item = RateTier>) -> ExchangeResult<Self> {
        let mut tiers: Vec<RateTier> = tiers.into_iter().collect();
        match tiers.len() {
            0 => Err(ExchangeError::Configuration(
                "exchanger needs at least one rate tier".to_string(),
            )),
            1 => Ok(Self::single(tiers.remove(0))),
            _ => Ok(Self::tiered(Ladder::new(tiers))),
        }
    }

    pub(crate) fn single(tier: RateTier) -> Self {
        Self {
            kind: Kind::Single(tier.without_threshold()),
        }
    }

    pub(crate) fn tiered(ladder: Ladder) -> Self {
        Self {
            kind: Kind::Tiered(ladder),
        }
    }

    /// Convert an amount on the buy side.
    pub fn buy(&self, amount: f64) -> ExchangeResult<f64> {
        self.quote(Side::Buy, amount)
    }

    /// Convert an amount on the sell side.
    pub fn sell(&self, amount: f64) -> ExchangeResult<f64> {
        self.quote(Side::Sell, amount)
    }

    /// Convert an amount on the given side.
    pub fn quote(&self, side: Side, amount: f64) -> ExchangeResult<f64> {
        self.resolve(side, amount).map(|(_, value)| value)
    }

    /// Get the tier a query on `side` for `amount` would use.
    pub fn select(&self, side: Side, amount: f64) -> ExchangeResult<&RateTier> {
        self.resolve(side, amount).map(|(tier, _)| tier)
    }

    fn resolve(&self, side: Side, amount: f64) -> ExchangeResult<(&RateTier, f64)> {
        match &self.kind {
            Kind::Single(tier) => scan(std::iter::once(tier), side, amount),
            Kind::Tiered(ladder) => scan(ladder.candidates(side), side, amount),
        }
    }

    /// Tiers in feed order.
    pub fn tiers(&self) -> &[RateTier] {
        match &self.kind {
            Kind::Single(tier) => std::slice::from_ref(tier),
            Kind::Tiered(ladder) => &ladder.tiers,
        }
    }

    /// Number of tiers. Never zero.
    pub fn tier_count(&self) -> usize {
        self.tiers().len()
    }

    /// Check if more than one tier is in play.
    pub fn is_tiered(&self) -> bool {
        matches!(self.kind, Kind::Tiered(_))
    }
}
