//! Key-value storage for the storefront.
//!
//! Provides a small storage seam ([`KvStore`]) with an in-memory backend and,
//! in the browser, a `localStorage` backend. On top of it sit a typed JSON
//! [`Cache`] and the [`CartStore`], which keeps the single cart record with a
//! sliding expiry.
//!
//! # Example
//!
//! ```
//! use shopfront_cache::{CartStore, ManualClock, MemoryStore};
//! use shopfront_commerce::prelude::*;
//!
//! let store = CartStore::new(MemoryStore::new(), ManualClock::default());
//!
//! let pen = Product::new(1, "Pen", Money::from_units(10), "pen.png");
//! let mut cart = Cart::default();
//! cart.add_product(&pen).unwrap();
//!
//! store.save_cart(cart.items()).unwrap();
//! assert_eq!(store.get_cart().len(), 1);
//!
//! store.clear_cart().unwrap();
//! assert!(store.get_cart().is_empty());
//! ```

mod cart_store;
mod clock;
mod error;
mod kv;

pub use cart_store::{CartRecord, CartStore, DEFAULT_CART_KEY, DEFAULT_CART_TTL_MINUTES};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CacheError;
pub use kv::{Cache, KvStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use kv::LocalStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, CartStore, Clock, KvStore, MemoryStore, SystemClock};
}
