//! Storefront configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use shopfront_cache::{DEFAULT_CART_KEY, DEFAULT_CART_TTL_MINUTES};
use shopfront_observability::{LogConfig, LogFormat};

use crate::error::ConfigError;

/// Default location of the product catalog, relative to the page.
pub const DEFAULT_CATALOG_URL: &str = "product.json";

/// Default lifetime of a toast notification.
pub const DEFAULT_TOAST_DURATION_MS: u32 = 3000;

/// Default currency prefix for price labels.
pub const DEFAULT_CURRENCY_LABEL: &str = "Rs.";

/// Longest accepted cart lifetime: one year.
pub const MAX_CART_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Configuration for a storefront session.
///
/// Every field has a default, so an empty TOML or JSON document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Where the catalog resource lives. Relative paths are resolved against
    /// the page URL.
    pub catalog_url: String,
    /// Storage key of the cart record.
    pub storage_key: String,
    /// Minutes a cart survives after its last write.
    pub cart_ttl_minutes: i64,
    /// How long a toast stays on screen.
    pub toast_duration_ms: u32,
    /// Prefix for every price label.
    pub currency_label: String,
    /// `EnvFilter` directive for logging.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            storage_key: DEFAULT_CART_KEY.to_string(),
            cart_ttl_minutes: DEFAULT_CART_TTL_MINUTES,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Human,
        }
    }
}

impl StorefrontConfig {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document and validate it.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the catalog location.
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Set the cart storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the cart lifetime in minutes.
    pub fn with_cart_ttl_minutes(mut self, minutes: i64) -> Self {
        self.cart_ttl_minutes = minutes;
        self
    }

    /// Set the toast lifetime.
    pub fn with_toast_duration_ms(mut self, ms: u32) -> Self {
        self.toast_duration_ms = ms;
        self
    }

    /// Set the currency prefix.
    pub fn with_currency_label(mut self, label: impl Into<String>) -> Self {
        self.currency_label = label.into();
        self
    }

    /// Set the log filter directive.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the log output format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cart_ttl()?;
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.catalog_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "catalog_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Cart lifetime as a duration, within `1..=MAX_CART_TTL_MINUTES`.
    pub fn cart_ttl(&self) -> Result<Duration, ConfigError> {
        let minutes = self.cart_ttl_minutes;
        if !(1..=MAX_CART_TTL_MINUTES).contains(&minutes) {
            return Err(ConfigError::Invalid {
                field: "cart_ttl_minutes",
                reason: format!("must be between 1 and {MAX_CART_TTL_MINUTES}, got {minutes}"),
            });
        }
        Duration::try_minutes(minutes).ok_or_else(|| ConfigError::Invalid {
            field: "cart_ttl_minutes",
            reason: format!("{minutes} minutes is not a representable duration"),
        })
    }

    /// Logging settings derived from this configuration.
    pub fn log_config(&self) -> LogConfig {
        LogConfig::new(self.log_level.clone()).with_format(self.log_format)
    }
}
