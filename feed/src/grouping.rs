//! Grouping of feed records into per-pair exchangers.

use std::collections::BTreeMap;

use ratequote_common::{split_currency, Currency, CurrencyPair, RateGroup};
use ratequote_exchange::{Exchanger, RateTier, Threshold};
use tracing::{debug, warn};

use crate::error::FeedResult;
use crate::pair::PairExchanger;
use crate::record::{FeedItem, FeedResponse};

/// Build one exchanger per (source, destination, group).
///
/// Tiers keep their feed order inside each group. Output is sorted by pair,
/// then group. Records that cannot be turned into a tier are logged and
/// skipped; they never take the rest of the feed down with them.
pub fn group_rates(response: &FeedResponse) -> FeedResult<Vec<PairExchanger>> {
    let mut grouped: BTreeMap<(CurrencyPair, RateGroup), Vec<RateTier>> = BTreeMap::new();

    for item in &response.items {
        match item_tier(item) {
            Ok((pair, group, tier)) => grouped.entry((pair, group)).or_default().push(tier),
            Err(e) => warn!(
                currency = %item.currency_abbr,
                group = %item.currency_group_abbr,
                error = %e,
                "Skipping rate record"
            ),
        }
    }

    let pairs = grouped
        .into_iter()
        .map(|((pair, group), tiers)| {
            let exchanger = Exchanger::build(tiers)?;
            Ok(PairExchanger::new(pair, group, exchanger))
        })
        .collect::<FeedResult<Vec<_>>>()?;

    debug!(records = response.items.len(), pairs = pairs.len(), "Grouped rate records");
    Ok(pairs)
}

/// The feed publishes one gradation per record, used for both sides.
fn item_tier(item: &FeedItem) -> FeedResult<(CurrencyPair, RateGroup, RateTier)> {
    let (src, dst) = split_currency(&item.currency_abbr)?;
    let pair = CurrencyPair::new(src, dst.unwrap_or_else(Currency::rub));
    let group = RateGroup::new(item.currency_group_abbr.as_str());
    let tier = RateTier::new(item.buy, item.sell, Threshold::uniform(item.gradation)?)?;
    Ok((pair, group, tier))
}
