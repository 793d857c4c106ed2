//! Error types for the storefront core.

use shopfront_cache::CacheError;
use shopfront_commerce::CommerceError;
use thiserror::Error;

/// Catalog loading failures.
///
/// `Unavailable` and `Parse` both mean the catalog could not be shown; the
/// page stays usable with an empty grid.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The resource could not be fetched.
    #[error("Catalog unavailable at {url}: {reason}")]
    Unavailable { url: String, reason: String },

    /// The resource was fetched but is not a product list.
    #[error("Catalog at {url} is not a valid product list: {reason}")]
    Parse { url: String, reason: String },

    /// The catalog location is not a valid URL.
    #[error("Invalid catalog URL {0}")]
    InvalidUrl(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML did not parse.
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON did not parse.
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors that can occur in the storefront.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Domain rule violated.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Storage failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
