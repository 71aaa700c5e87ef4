//! Exchangers tagged with their currency pair and rate group.

use std::fmt;

use ratequote_common::{Currency, CurrencyPair, RateGroup};
use ratequote_exchange::{ExchangeResult, Exchanger, Side};

/// An exchanger together with the metadata needed to present it.
#[derive(Debug, Clone, PartialEq)]
pub struct PairExchanger {
    pair: CurrencyPair,
    group: RateGroup,
    exchanger: Exchanger,
}

impl PairExchanger {
    pub fn new(pair: CurrencyPair, group: RateGroup, exchanger: Exchanger) -> Self {
        Self {
            pair,
            group,
            exchanger,
        }
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    /// Currency being exchanged.
    pub fn src(&self) -> &Currency {
        &self.pair.base
    }

    /// Currency received.
    pub fn dst(&self) -> &Currency {
        &self.pair.quote
    }

    pub fn group(&self) -> &RateGroup {
        &self.group
    }

    pub fn exchanger(&self) -> &Exchanger {
        &self.exchanger
    }

    pub fn buy(&self, amount: f64) -> ExchangeResult<f64> {
        self.exchanger.buy(amount)
    }

    pub fn sell(&self, amount: f64) -> ExchangeResult<f64> {
        self.exchanger.sell(amount)
    }

    pub fn quote(&self, side: Side, amount: f64) -> ExchangeResult<f64> {
        self.exchanger.quote(side, amount)
    }

    /// Same group, reversed pair.
    pub fn invert(&self) -> PairExchanger {
        Self {
            pair: self.pair.inverse(),
            group: self.group.clone(),
            exchanger: self.exchanger.invert(),
        }
    }
}

impl fmt::Display for PairExchanger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} › {} ({})",
            self.pair.base,
            self.pair.quote,
            self.group.description()
        )
    }
}

/// Predicate over pair exchangers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairFilter {
    /// Keep entries whose pair is one of these.
    Pairs(Vec<CurrencyPair>),
    /// Keep entries whose group is one of these.
    Groups(Vec<RateGroup>),
}

impl PairFilter {
    pub fn matches(&self, entry: &PairExchanger) -> bool {
        match self {
            PairFilter::Pairs(pairs) => pairs.contains(entry.pair()),
            PairFilter::Groups(groups) => groups.contains(entry.group()),
        }
    }
}

/// Entries that satisfy every filter. No filters keeps everything.
pub fn filter_pairs<'a>(
    entries: &'a [PairExchanger],
    filters: &[PairFilter],
) -> Vec<&'a PairExchanger> {
    entries
        .iter()
        .filter(|entry| filters.iter().all(|filter| filter.matches(entry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratequote_exchange::RateTier;

    fn entry(base: &str, quote: &str, group: &str, buy: f64, sell: f64) -> PairExchanger {
        let exchanger = Exchanger::build(vec![RateTier::flat(buy, sell).unwrap()]).unwrap();
        PairExchanger::new(
            CurrencyPair::new(Currency::new(base), Currency::new(quote)),
            RateGroup::new(group),
            exchanger,
        )
    }

    #[test]
    fn test_display() {
        let e = entry("USD", "RUB", "cash", 57.0, 58.0);
        assert_eq!(e.to_string(), "USD › RUB (in office, cash)");
    }

    #[test]
    fn test_invert_swaps_pair_and_keeps_group() {
        let e = entry("USD", "RUB", "tele", 50.0, 60.0);
        let inverted = e.invert();

        assert_eq!(inverted.src(), &Currency::rub());
        assert_eq!(inverted.dst(), &Currency::usd());
        assert_eq!(inverted.group(), e.group());
        assert_eq!(inverted.buy(600.0), Ok(10.0));
        assert_eq!(inverted.sell(500.0), Ok(10.0));
    }

    #[test]
    fn test_filter_by_pair_and_group() {
        let entries = vec![
            entry("USD", "RUB", "cash", 1.0, 1.0),
            entry("USD", "RUB", "tele", 1.0, 1.0),
            entry("EUR", "RUB", "cash", 1.0, 1.0),
            entry("EUR", "USD", "tele", 1.0, 1.0),
        ];
        let usd_rub = CurrencyPair::new(Currency::usd(), Currency::rub());

        let by_pair = filter_pairs(&entries, &[PairFilter::Pairs(vec![usd_rub.clone()])]);
        assert_eq!(by_pair.len(), 2);

        let by_both = filter_pairs(
            &entries,
            &[
                PairFilter::Pairs(vec![usd_rub]),
                PairFilter::Groups(vec![RateGroup::new("tele")]),
            ],
        );
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both[0].group().id(), "tele");

        assert_eq!(filter_pairs(&entries, &[]).len(), 4);
    }
}
