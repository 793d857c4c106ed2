//! Checkout form and validation.

use crate::cart::{Cart, CartItem};
use crate::checkout::PlacedOrder;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Raw values submitted with the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckoutForm {
    /// Customer name.
    pub name: String,
    /// Delivery address.
    pub address: String,
    /// Contact email.
    pub email: String,
}

impl CheckoutForm {
    /// Create a form from submitted values.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            email: email.into(),
        }
    }

    /// Names of the fields that are blank after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        missing
    }

    /// Check that every field is filled in.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::ValidationError(format!(
                "missing {}",
                missing.join(", ")
            )))
        }
    }

    /// Validate the form and turn it into an order for `items`.
    ///
    /// Field values are trimmed. The cart lines are copied into the order
    /// so the caller can clear its cart afterwards.
    pub fn place_order(&self, items: &[CartItem]) -> Result<PlacedOrder, CommerceError> {
        self.validate()?;
        let cart = Cart::from_items(items.to_vec())?;
        let total = cart.total()?;

        Ok(PlacedOrder {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            email: self.email.trim().to_string(),
            items: cart.into_items(),
            total,
        })
    }
}
