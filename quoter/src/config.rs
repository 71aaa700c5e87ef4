//! Quoter configuration.

use std::path::Path;
use std::time::Duration;

use ratequote_common::RateGroup;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default pause between feed refreshes.
pub const DEFAULT_REFRESH_SECS: u64 = 5 * 60;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main quoter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoterConfig {
    /// Path of the JSON rate feed.
    pub feed_path: String,
    /// Seconds between feed refreshes in watch mode.
    pub refresh_interval_secs: u64,
    /// Rate groups to show, in display order.
    pub groups: Vec<RateGroup>,
    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON log lines.
    pub json_logs: bool,
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            feed_path: "rates.json".to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            groups: RateGroup::defaults(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl QuoterConfig {
    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply overrides from environment variables.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("QUOTER_FEED_PATH") {
            self.feed_path = path;
        }

        if let Some(secs) = lookup("QUOTER_REFRESH_SECS") {
            if let Ok(secs) = secs.parse() {
                self.refresh_interval_secs = secs;
            }
        }

        if let Some(groups) = lookup("QUOTER_GROUPS") {
            self.groups = groups
                .split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(RateGroup::new)
                .collect();
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }

        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_path.trim().is_empty() {
            return Err(ConfigError::Invalid("feed path cannot be empty".to_string()));
        }

        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh interval cannot be 0".to_string(),
            ));
        }

        if self.groups.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one rate group is required".to_string(),
            ));
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
