//! Storefront widget core.
//!
//! Everything the shop page does, minus the DOM:
//! - Catalog loading over HTTP with an in-memory catalog cache
//! - View models for the product grid and the cart table
//! - The interaction handlers (search, sort, add, view, remove, checkout)
//!   driving a [`StorefrontView`] the page implements
//!
//! The page owns a single [`Storefront`] and forwards its events to it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shopfront_core::prelude::*;
//!
//! let config = StorefrontConfig::from_toml_str(include_str!("../storefront.toml"))?;
//! let source = HttpCatalogSource::resolve(&page_url, &config.catalog_url)?;
//! let storefront = Storefront::new(config, source, LocalStorage::open()?, SystemClock, view)?;
//!
//! storefront.init().await;
//! storefront.add_to_cart(ProductId::new(1)).await;
//! ```

pub mod prelude;

mod catalog;
mod config;
mod error;
mod notify;
mod render;
mod storefront;
mod view;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use notify::*;
pub use render::*;
pub use storefront::*;
pub use view::*;

// Re-export the crates handlers are built from
pub use shopfront_cache;
pub use shopfront_commerce;
pub use shopfront_observability;
