//! Storefront domain types and logic.
//!
//! This crate holds everything about the shop that does not touch the
//! browser:
//!
//! - **Catalog**: products as published in the static catalog resource
//! - **Search**: name filtering and sort orders for the product grid
//! - **Cart**: cart lines, quantity accounting and totals
//! - **Checkout**: the checkout form and its validation
//!
//! # Example
//!
//! ```
//! use shopfront_commerce::prelude::*;
//!
//! let pen = Product::new(1, "Pen", Money::from_units(10), "img/pen.png");
//!
//! let mut cart = Cart::default();
//! cart.add_product(&pen).unwrap();
//! cart.add_product(&pen).unwrap();
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().unwrap(), Money::from_units(20));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

pub use cart::{Cart, CartItem, CartPricing, LineItemPricing, MAX_QUANTITY_PER_ITEM};
pub use catalog::{dedupe_products, find_product, Product};
pub use checkout::{CheckoutForm, PlacedOrder};
pub use search::{CatalogQuery, SortOption};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{dedupe_products, find_product, Product};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartPricing, LineItemPricing, MAX_QUANTITY_PER_ITEM};

    // Checkout
    pub use crate::checkout::{CheckoutForm, PlacedOrder};

    // Search
    pub use crate::search::{CatalogQuery, SortOption};
}
