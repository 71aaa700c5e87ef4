//! Rate tiers and their activation thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{ExchangeError, ExchangeResult};
use crate::side::Side;

/// Minimum amounts, in source currency units, that activate a tier.
///
/// Both minimums are finite and non-negative; zero means the tier is always
/// active. Negative zero is stored as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    buy_minimum: f64,
    sell_minimum: f64,
}

impl Threshold {
    /// A threshold that every non-negative amount clears.
    pub const ZERO: Threshold = Threshold {
        buy_minimum: 0.0,
        sell_minimum: 0.0,
    };

    /// Create a threshold with independent buy and sell minimums.
    pub fn new(buy_minimum: f64, sell_minimum: f64) -> ExchangeResult<Self> {
        validate_minimum("buy", buy_minimum)?;
        validate_minimum("sell", sell_minimum)?;
        Ok(Self {
            buy_minimum: buy_minimum + 0.0,
            sell_minimum: sell_minimum + 0.0,
        })
    }

    /// Create a threshold using the same minimum on both sides.
    pub fn uniform(minimum: f64) -> ExchangeResult<Self> {
        Self::new(minimum, minimum)
    }

    pub(crate) fn from_parts(buy_minimum: f64, sell_minimum: f64) -> Self {
        Self {
            buy_minimum,
            sell_minimum,
        }
    }

    pub fn buy_minimum(&self) -> f64 {
        self.buy_minimum
    }

    pub fn sell_minimum(&self) -> f64 {
        self.sell_minimum
    }

    /// Check if this threshold is always satisfied.
    pub fn is_zero(&self) -> bool {
        self.buy_minimum == 0.0 && self.sell_minimum == 0.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::ZERO
    }
}

fn validate_minimum(side: &str, minimum: f64) -> ExchangeResult<()> {
    if !minimum.is_finite() || minimum < 0.0 {
        return Err(ExchangeError::Configuration(format!(
            "{} minimum must be finite and non-negative, got {}",
            side, minimum
        )));
    }
    Ok(())
}

/// Smallest accepted factor. Normal positive floats in
/// `[MIN_FACTOR, MAX_FACTOR]` have reciprocals in the same range.
pub const MIN_FACTOR: f64 = f64::MIN_POSITIVE;

/// Largest accepted factor, `2^1022`.
pub const MAX_FACTOR: f64 = 1.0 / f64::MIN_POSITIVE;

fn validate_factor(side: &str, factor: f64) -> ExchangeResult<()> {
    if !(MIN_FACTOR..=MAX_FACTOR).contains(&factor) {
        return Err(ExchangeError::Configuration(format!(
            "{} factor must be within [{:e}, {:e}], got {}",
            side, MIN_FACTOR, MAX_FACTOR, factor
        )));
    }
    Ok(())
}

/// Result of offering an amount to a single tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Outcome {
    /// The tier applies; holds `amount * factor`.
    Converted(f64),
    /// The amount itself is unusable. Terminal for the whole query.
    InvalidAmount,
    /// The amount is below this tier's minimum; a cheaper tier may apply.
    BelowThreshold,
}

/// One priced band of a currency pair.
///
/// Immutable after construction. The `inverted` marker records whether the
/// tier was produced by an odd number of inversions, which selects the rule
/// used to re-express its thresholds on the next inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierSpec", into = "TierSpec")]
pub struct RateTier {
    buy_factor: f64,
    sell_factor: f64,
    threshold: Threshold,
    inverted: bool,
}

impl RateTier {
    /// Create a tier. Factors must lie in `[MIN_FACTOR, MAX_FACTOR]` so that
    /// their reciprocals do too.
    pub fn new(buy_factor: f64, sell_factor: f64, threshold: Threshold) -> ExchangeResult<Self> {
        validate_factor("buy", buy_factor)?;
        validate_factor("sell", sell_factor)?;
        Ok(Self {
            buy_factor,
            sell_factor,
            threshold,
            inverted: false,
        })
    }

    /// Create an always-active tier.
    pub fn flat(buy_factor: f64, sell_factor: f64) -> ExchangeResult<Self> {
        Self::new(buy_factor, sell_factor, Threshold::ZERO)
    }

    pub fn buy_factor(&self) -> f64 {
        self.buy_factor
    }

    pub fn sell_factor(&self) -> f64 {
        self.sell_factor
    }

    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    /// Check if this tier came out of an odd number of inversions.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Get the factor for a side.
    pub fn factor(&self, side: Side) -> f64 {
        side.factor(self)
    }

    /// Get the minimum amount for a side.
    pub fn minimum(&self, side: Side) -> f64 {
        side.minimum(&self.threshold)
    }

    /// Same tier with its threshold cleared.
    pub(crate) fn without_threshold(self) -> Self {
        Self {
            threshold: Threshold::ZERO,
            ..self
        }
    }

    /// Build a tier from already validated parts.
    pub(crate) fn from_parts(
        buy_factor: f64,
        sell_factor: f64,
        threshold: Threshold,
        inverted: bool,
    ) -> Self {
        Self {
            buy_factor,
            sell_factor,
            threshold,
            inverted,
        }
    }

    /// Offer an amount to this tier.
    ///
    /// The sign check runs before the threshold check so a negative amount is
    /// never mistaken for one that is merely too small.
    pub(crate) fn exchange(&self, side: Side, amount: f64) -> Outcome {
        if amount.is_nan() || amount < 0.0 {
            Outcome::InvalidAmount
        } else if amount < self.minimum(side) {
            Outcome::BelowThreshold
        } else {
            Outcome::Converted(amount * self.factor(side))
        }
    }
}

/// Wire shape of a tier: `{buyFactor, sellFactor, buyMinimum, sellMinimum}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSpec {
    pub buy_factor: f64,
    pub sell_factor: f64,
    #[serde(default)]
    pub buy_minimum: f64,
    #[serde(default)]
    pub sell_minimum: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inverted: bool,
}

impl TryFrom<TierSpec> for RateTier {
    type Error = ExchangeError;

    fn try_from(spec: TierSpec) -> ExchangeResult<Self> {
        let threshold = Threshold::new(spec.buy_minimum, spec.sell_minimum)?;
        let mut tier = RateTier::new(spec.buy_factor, spec.sell_factor, threshold)?;
        tier.inverted = spec.inverted;
        Ok(tier)
    }
}

impl From<RateTier> for TierSpec {
    fn from(tier: RateTier) -> Self {
        Self {
            buy_factor: tier.buy_factor,
            sell_factor: tier.sell_factor,
            buy_minimum: tier.threshold.buy_minimum,
            sell_minimum: tier.threshold.sell_minimum,
            inverted: tier.inverted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(buy: f64, sell: f64, minimum: f64) -> RateTier {
        RateTier::new(buy, sell, Threshold::uniform(minimum).unwrap()).unwrap()
    }

    #[test]
    fn test_threshold_rejects_negative_and_nan() {
        assert!(Threshold::new(-1.0, 0.0).is_err());
        assert!(Threshold::new(0.0, -0.5).is_err());
        assert!(Threshold::new(f64::NAN, 0.0).is_err());
        assert!(Threshold::new(f64::INFINITY, 0.0).is_err());
        assert!(Threshold::new(0.0, 0.0).unwrap().is_zero());
    }

    #[test]
    fn test_threshold_negative_zero_is_zero() {
        let threshold = Threshold::new(-0.0, -0.0).unwrap();

        assert!(threshold.buy_minimum().is_sign_positive());
        assert!(threshold.sell_minimum().is_sign_positive());
        assert_eq!(threshold, Threshold::ZERO);
    }

    #[test]
    fn test_tier_rejects_bad_factors() {
        assert!(RateTier::flat(0.0, 1.0).is_err());
        assert!(RateTier::flat(1.0, -2.0).is_err());
        assert!(RateTier::flat(f64::INFINITY, 1.0).is_err());
        assert!(RateTier::flat(1.0, f64::NAN).is_err());
        assert!(RateTier::flat(2.0, 3.0).is_ok());
    }

    #[test]
    fn test_tier_rejects_factors_without_finite_reciprocal() {
        assert!(RateTier::flat(1e-310, 1.0).is_err());
        assert!(RateTier::flat(1.0, f64::MAX).is_err());

        let tier = RateTier::flat(MIN_FACTOR, MAX_FACTOR).unwrap();
        assert!((1.0 / tier.buy_factor()).is_finite());
        assert!((1.0 / tier.sell_factor()) >= MIN_FACTOR);
    }

    #[test]
    fn test_exchange_applies_factor_per_side() {
        let tier = tier(2.0, 3.0, 10.0);

        assert_eq!(tier.exchange(Side::Buy, 10.0), Outcome::Converted(20.0));
        assert_eq!(tier.exchange(Side::Sell, 10.0), Outcome::Converted(30.0));
    }

    #[test]
    fn test_exchange_below_threshold() {
        let tier = tier(2.0, 3.0, 10.0);

        assert_eq!(tier.exchange(Side::Buy, 9.99), Outcome::BelowThreshold);
        assert_eq!(tier.exchange(Side::Sell, 0.0), Outcome::BelowThreshold);
    }

    #[test]
    fn test_negative_checked_before_threshold() {
        let tier = tier(2.0, 3.0, 10.0);

        assert_eq!(tier.exchange(Side::Buy, -1.0), Outcome::InvalidAmount);
        assert_eq!(tier.exchange(Side::Sell, f64::NAN), Outcome::InvalidAmount);
    }

    #[test]
    fn test_independent_side_minimums() {
        let tier = RateTier::new(2.0, 3.0, Threshold::new(5.0, 50.0).unwrap()).unwrap();

        assert_eq!(tier.exchange(Side::Buy, 10.0), Outcome::Converted(20.0));
        assert_eq!(tier.exchange(Side::Sell, 10.0), Outcome::BelowThreshold);
    }

    #[test]
    fn test_tier_json_shape() {
        let tier: RateTier = serde_json::from_str(
            r#"{"buyFactor": 2.0, "sellFactor": 3.0, "buyMinimum": 10.0, "sellMinimum": 20.0}"#,
        )
        .unwrap();

        assert_eq!(tier.buy_factor(), 2.0);
        assert_eq!(tier.threshold().sell_minimum(), 20.0);
        assert!(!tier.is_inverted());

        let json = serde_json::to_value(tier).unwrap();
        assert_eq!(json["buyMinimum"], 10.0);
        assert!(json.get("inverted").is_none());
    }

    #[test]
    fn test_tier_json_is_validated() {
        let result = serde_json::from_str::<RateTier>(
            r#"{"buyFactor": 2.0, "sellFactor": 3.0, "buyMinimum": -1.0}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<RateTier>(r#"{"buyFactor": 0.0, "sellFactor": 3.0}"#);
        assert!(result.is_err());
    }
}
