//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use shopfront_core::prelude::*;
//! ```

// Domain types
pub use shopfront_commerce::prelude::*;

// Storage
pub use shopfront_cache::{CartStore, Clock, KvStore, ManualClock, MemoryStore, SystemClock};

#[cfg(target_arch = "wasm32")]
pub use shopfront_cache::LocalStorage;

// Logging
pub use shopfront_observability::{LogConfig, LogFormat};

// Storefront types
pub use crate::{
    badge_label, catalog_cards, CartRow, CartTable, CatalogCache, CatalogError, CatalogSource,
    ConfigError, HttpCatalogSource, ProductCard, StaticCatalogSource, Storefront,
    StorefrontConfig, StorefrontError, StorefrontView, Toast, ToastKind, MAX_CART_TTL_MINUTES,
};
