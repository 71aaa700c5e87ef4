//! Rate groups.
//!
//! A feed publishes separate rate sets per channel (office cash, cashless,
//! online banking, ...). The group label travels with each pair as metadata;
//! it never affects the conversion arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque rate group label as published by the feed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateGroup(String);

impl RateGroup {
    pub const CASH: &'static str = "cash";
    pub const CASH_DESK: &'static str = "cash-desk";
    pub const CENTRAL_BANK: &'static str = "central-bank";
    pub const TELE: &'static str = "tele";

    /// Create a group from its feed label.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the feed label.
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Human readable description of the group.
    pub fn description(&self) -> String {
        match self.0.as_str() {
            Self::CASH => "in office, cash".to_string(),
            Self::CASH_DESK => "at the cash desk".to_string(),
            Self::CENTRAL_BANK => "in office, cashless".to_string(),
            Self::TELE => "online banking".to_string(),
            other => format!("unknown group {:?}", other),
        }
    }

    /// Groups in their usual display order.
    pub fn defaults() -> Vec<RateGroup> {
        [Self::TELE, Self::CASH, Self::CENTRAL_BANK, Self::CASH_DESK]
            .into_iter()
            .map(RateGroup::new)
            .collect()
    }
}

impl fmt::Display for RateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RateGroup {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_group_description() {
        assert_eq!(RateGroup::new("cash").description(), "in office, cash");
        assert_eq!(RateGroup::new("tele").description(), "online banking");
    }

    #[test]
    fn test_unknown_group_description() {
        assert_eq!(
            RateGroup::new("w4").description(),
            "unknown group \"w4\""
        );
    }

    #[test]
    fn test_group_serializes_as_plain_string() {
        let json = serde_json::to_string(&RateGroup::new("cash-desk")).unwrap();
        assert_eq!(json, "\"cash-desk\"");
    }
}
