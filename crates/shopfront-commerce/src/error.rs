//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Price is negative or not a finite number.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Duplicate product id within a cart.
    #[error("Duplicate cart line for product {0}")]
    DuplicateItem(u64),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
