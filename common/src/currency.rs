//! Currency codes and currency pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CommonError, Result};

/// Currency code, e.g. `USD`.
///
/// Codes are opaque to the rate engine; they are only compared and printed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Russian ruble, the implied destination of single-currency feed entries.
    pub fn rub() -> Self {
        Self::new("RUB")
    }

    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A directed currency pair: amounts in `base` are converted into `quote`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Source currency (the one being exchanged).
    pub base: Currency,
    /// Destination currency (the one received).
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Get the inverse pair.
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CommonError;

    /// Parses `SRC/DST`. A bare `SRC` is rejected; use [`split_currency`] when a
    /// default destination applies.
    fn from_str(s: &str) -> Result<Self> {
        match split_currency(s)? {
            (base, Some(quote)) => Ok(Self::new(base, quote)),
            (_, None) => Err(CommonError::MalformedPair(s.to_string())),
        }
    }
}

/// Split a feed currency code into source and optional destination.
///
/// `"USD/EUR"` yields `(USD, Some(EUR))` and `"USD"` yields `(USD, None)`.
pub fn split_currency(code: &str) -> Result<(Currency, Option<Currency>)> {
    let parts: Vec<&str> = code.split('/').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(CommonError::EmptyCurrency);
    }

    match parts.as_slice() {
        [src] => Ok((Currency::new(*src), None)),
        [src, dst] => Ok((Currency::new(*src), Some(Currency::new(*dst)))),
        _ => Err(CommonError::MalformedPair(code.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_normalized() {
        assert_eq!(Currency::new(" usd ").code(), "USD");
        assert_eq!(Currency::from("eur"), Currency::eur());
    }

    #[test]
    fn test_split_currency() {
        assert_eq!(split_currency("USD").unwrap(), (Currency::usd(), None));
        assert_eq!(
            split_currency("EUR/USD").unwrap(),
            (Currency::eur(), Some(Currency::usd()))
        );
        assert_eq!(
            split_currency("EUR/USD/GBP"),
            Err(CommonError::MalformedPair("EUR/USD/GBP".to_string()))
        );
        assert_eq!(split_currency("EUR/"), Err(CommonError::EmptyCurrency));
        assert_eq!(split_currency(""), Err(CommonError::EmptyCurrency));
    }

    #[test]
    fn test_pair_inverse_and_display() {
        let pair = CurrencyPair::new(Currency::usd(), Currency::rub());

        assert_eq!(pair.to_string(), "USD/RUB");
        assert_eq!(pair.inverse().to_string(), "RUB/USD");
        assert_eq!(pair.inverse().inverse(), pair);
    }

    #[test]
    fn test_pair_from_str() {
        let pair: CurrencyPair = "usd/eur".parse().unwrap();
        assert_eq!(pair, CurrencyPair::new(Currency::usd(), Currency::eur()));

        assert!("USD".parse::<CurrencyPair>().is_err());
    }
}
