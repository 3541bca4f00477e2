//! Store configuration parsing and validation.
//!
//! # Responsibility
//! - Parse the console's settings blob into a typed configuration.
//! - Validate refresh cadence before a scheduler is built from it.
//!
//! # Invariants
//! - Missing fields fall back to defaults; parsing never panics.
//! - A refresh interval below the floor is rejected, not silently fixed.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default cadence of the background synchronizer.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;
/// Lower bound stopping pathological polling of the catalog service.
pub const MIN_REFRESH_INTERVAL_MS: u64 = 1_000;

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Input is not valid JSON for the expected shape.
    Parse(String),
    /// Refresh interval is below the supported floor.
    IntervalTooSmall { given_ms: u64, floor_ms: u64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "invalid store config: {details}"),
            Self::IntervalTooSmall { given_ms, floor_ms } => write!(
                f,
                "refresh interval {given_ms}ms is below the {floor_ms}ms floor"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Typed store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Background refresh cadence in milliseconds.
    pub refresh_interval_ms: u64,
    /// Whether the periodic synchronizer starts at all.
    pub auto_refresh: bool,
    /// Optional log level override for `init_logging`.
    pub log_level: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            auto_refresh: true,
            log_level: None,
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON settings blob.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field-level constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_ms < MIN_REFRESH_INTERVAL_MS {
            return Err(ConfigError::IntervalTooSmall {
                given_ms: self.refresh_interval_ms,
                floor_ms: MIN_REFRESH_INTERVAL_MS,
            });
        }
        Ok(())
    }
}
