//! Structured logging setup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::ConsoleMakeWriter;

/// Errors from logging setup.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// The filter directive did not parse.
    #[error("Invalid log filter {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log collection).
    Json,
    /// Human-readable format (for development).
    #[default]
    Human,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Human => write!(f, "human"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" | "pretty" | "text" => Ok(Self::Human),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// What to log and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `shopfront_core=debug,info`.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Human,
        }
    }
}

impl LogConfig {
    /// Create a config with the given filter directive.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Default::default()
        }
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse the filter directive.
    pub fn env_filter(&self) -> Result<EnvFilter, ObservabilityError> {
        let directive = if self.filter.trim().is_empty() {
            "info"
        } else {
            self.filter.trim()
        };
        EnvFilter::try_new(directive).map_err(|e| ObservabilityError::InvalidFilter {
            directive: directive.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Install the global `tracing` subscriber.
///
/// Events go through [`ConsoleMakeWriter`]. Timestamps are left out: the
/// browser console stamps lines itself and `wasm32` has no system clock for
/// the formatter.
pub fn init(config: &LogConfig) -> Result<(), ObservabilityError> {
    let filter = config.env_filter()?;

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .without_time()
            .with_ansi(false)
            .with_writer(ConsoleMakeWriter)
            .boxed(),
        LogFormat::Human => tracing_subscriber::fmt::layer()
            .without_time()
            .with_ansi(false)
            .with_target(true)
            .with_writer(ConsoleMakeWriter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))
}
