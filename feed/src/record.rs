//! Vendor rate records.
//!
//! The upstream feed sends rates as strings that may use a decimal comma
//! (`"12,34"`) and timestamps as `"/Date(<unix millis>)/"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{FeedError, FeedResult};

/// A full feed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

impl FeedResponse {
    /// Decode a feed document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> FeedResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// One published rate: a tier of one pair within one rate group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Rate group label, e.g. `cash`.
    pub currency_group_abbr: String,
    /// `SRC` or `SRC/DST`; a bare source implies RUB as destination.
    pub currency_abbr: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(deserialize_with = "deserialize_rate_value")]
    pub buy: f64,
    #[serde(default)]
    pub buy_arrow: String,
    #[serde(deserialize_with = "deserialize_rate_value")]
    pub sell: f64,
    #[serde(default)]
    pub sell_arrow: String,
    /// Minimum amount for this tier, in source currency units.
    #[serde(default)]
    pub gradation: f64,
    #[serde(default, deserialize_with = "deserialize_rate_date")]
    pub date_active_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_metal: bool,
}

/// Parse a rate value that may use a decimal comma.
pub fn parse_rate_value(raw: &str) -> FeedResult<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    normalized
        .parse::<f64>()
        .map_err(|_| FeedError::InvalidValue(raw.to_string()))
}

/// Parse a `/Date(<unix millis>)/` timestamp.
pub fn parse_rate_date(raw: &str) -> FeedResult<DateTime<Utc>> {
    let millis = raw
        .trim()
        .strip_prefix("/Date(")
        .and_then(|s| s.strip_suffix(")/"))
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| FeedError::InvalidDate(raw.to_string()))?;

    DateTime::from_timestamp_millis(millis).ok_or_else(|| FeedError::InvalidDate(raw.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

fn deserialize_rate_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawValue::deserialize(deserializer)? {
        RawValue::Number(n) => Ok(n),
        RawValue::Text(s) => parse_rate_value(&s).map_err(serde::de::Error::custom),
    }
}

fn deserialize_rate_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) => parse_rate_date(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_rate_value() {
        assert_eq!(parse_rate_value("0").unwrap(), 0.0);
        assert_eq!(parse_rate_value("12").unwrap(), 12.0);
        assert_eq!(parse_rate_value("12,34").unwrap(), 12.34);
        assert_eq!(parse_rate_value("12.34").unwrap(), 12.34);
        assert!(matches!(
            parse_rate_value("twelve"),
            Err(FeedError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_parse_rate_date() {
        let date = parse_rate_date("/Date(1506453186593)/").unwrap();

        let expected = Utc.with_ymd_and_hms(2017, 9, 26, 19, 13, 6).unwrap();
        assert_eq!(date.timestamp(), expected.timestamp());
        assert_eq!(date.nanosecond(), 593_000_000);

        assert!(parse_rate_date("2017-09-26").is_err());
        assert!(parse_rate_date("/Date(abc)/").is_err());
    }

    #[test]
    fn test_decode_item() {
        let json = r#"{
            "currencyGroupAbbr": "cash",
            "currencyAbbr": "USD",
            "title": "US dollar",
            "quantity": 1,
            "buy": "57,10",
            "buyArrow": "up",
            "sell": "58.35",
            "sellArrow": "down",
            "gradation": 1000,
            "dateActiveFrom": "/Date(1506453186593)/",
            "isMetal": false
        }"#;

        let item: FeedItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.currency_group_abbr, "cash");
        assert_eq!(item.buy, 57.10);
        assert_eq!(item.sell, 58.35);
        assert_eq!(item.gradation, 1000.0);
        assert!(item.date_active_from.is_some());
    }

    #[test]
    fn test_decode_minimal_item() {
        let json = r#"{"currencyGroupAbbr": "tele", "currencyAbbr": "EUR/USD", "buy": 1.1, "sell": "1,2"}"#;

        let item: FeedItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.buy, 1.1);
        assert_eq!(item.sell, 1.2);
        assert_eq!(item.gradation, 0.0);
        assert_eq!(item.date_active_from, None);
    }

    #[test]
    fn test_decode_rejects_bad_value() {
        let json = r#"{"items": [{"currencyGroupAbbr": "cash", "currencyAbbr": "USD", "buy": "n/a", "sell": "1"}]}"#;

        assert!(matches!(
            FeedResponse::from_slice(json.as_bytes()),
            Err(FeedError::Decode(_))
        ));
    }
}
