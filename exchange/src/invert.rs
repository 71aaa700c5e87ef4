//! Reverse-pair derivation.
//!
//! Inverting an exchanger for `SRC -> DST` yields one for `DST -> SRC` built
//! from the same tiers, without going back to the rate source.
//!
//! Factors swap sides and invert: the new buy factor is `1 / sell` and the new
//! sell factor is `1 / buy`. Minimums are restated in units of the new source
//! currency. A tier that has not been inverted yet multiplies its old minimum
//! by a factor; an already inverted tier divides instead. The two paths use
//! factors from different sides, so inverting twice does not in general
//! reproduce the original minimums. That matches the feed's own convention.
//!
//! Factor bounds keep every reciprocal finite. A restated minimum that would
//! overflow saturates at `f64::MAX`.

use crate::exchanger::{Exchanger, Ladder};
use crate::tier::{RateTier, Threshold};

impl RateTier {
    /// Tier for the reverse currency pair.
    pub fn invert(&self) -> RateTier {
        let old = self.threshold();
        let (buy_minimum, sell_minimum) = if self.is_inverted() {
            (
                old.sell_minimum() / self.buy_factor(),
                old.buy_minimum() / self.sell_factor(),
            )
        } else {
            (
                old.sell_minimum() * self.buy_factor(),
                old.buy_minimum() * self.sell_factor(),
            )
        };

        let threshold = Threshold::from_parts(saturate(buy_minimum), saturate(sell_minimum));

        RateTier::from_parts(
            1.0 / self.sell_factor(),
            1.0 / self.buy_factor(),
            threshold,
            !self.is_inverted(),
        )
    }
}

/// Minimums and factors are finite and non-negative, so the only way out of
/// range is upward.
fn saturate(minimum: f64) -> f64 {
    minimum.min(f64::MAX)
}

impl Exchanger {
    /// Exchanger for the reverse currency pair.
    pub fn invert(&self) -> Exchanger {
        invert(self)
    }
}

/// Derive the reverse-pair exchanger from `exchanger`.
///
/// The inverted tiers go through the same construction path as fresh ones:
/// they are re-sorted and the variant is chosen by tier count.
pub fn invert(exchanger: &Exchanger) -> Exchanger {
    let mut tiers: Vec<RateTier> = exchanger.tiers().iter().map(RateTier::invert).collect();
    if tiers.len() == 1 {
        Exchanger::single(tiers.remove(0))
    } else {
        Exchanger::tiered(Ladder::new(tiers))
    }
}
