//! Checkout module.
//!
//! Contains the checkout form and the order it produces.

mod form;
mod order;

pub use form::CheckoutForm;
pub use order::PlacedOrder;
