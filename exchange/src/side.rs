//! Direction of a conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tier::{RateTier, Threshold};

/// Which side of a tier a query uses.
///
/// `Buy` is the quoting party buying the source currency from the
/// counterparty, `Sell` is the opposite flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the factor this side applies from a tier.
    pub fn factor(&self, tier: &RateTier) -> f64 {
        match self {
            Side::Buy => tier.buy_factor(),
            Side::Sell => tier.sell_factor(),
        }
    }

    /// Get the minimum amount this side requires from a threshold.
    pub fn minimum(&self, threshold: &Threshold) -> f64 {
        match self {
            Side::Buy => threshold.buy_minimum(),
            Side::Sell => threshold.sell_minimum(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}
