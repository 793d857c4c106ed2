//! Placed order summary.

use crate::cart::CartItem;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An order accepted at checkout.
///
/// Nothing is sent anywhere; the order only drives the confirmation shown
/// to the customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    /// Customer name (trimmed).
    pub name: String,
    /// Delivery address (trimmed).
    pub address: String,
    /// Contact email (trimmed).
    pub email: String,
    /// Cart lines at the time of checkout.
    pub items: Vec<CartItem>,
    /// Order total.
    pub total: Money,
}

impl PlacedOrder {
    /// Message shown after a successful checkout.
    pub fn confirmation_message(&self) -> String {
        format!("Thank you for your order, {}!", self.name)
    }
}
