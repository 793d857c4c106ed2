//! Cart and cart line types.

use crate::cart::{CartPricing, LineItemPricing};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A product in the cart together with its quantity.
///
/// Serialized flat: the product's own fields plus `qty`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product snapshot taken when the line was created.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always at least 1.
    pub qty: u32,
}

impl CartItem {
    /// Create a new line for `product` with the given quantity.
    pub fn new(product: Product, qty: u32) -> Result<Self, CommerceError> {
        if qty == 0 {
            return Err(CommerceError::InvalidQuantity(qty));
        }
        if qty > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(qty, MAX_QUANTITY_PER_ITEM));
        }
        Ok(Self { product, qty })
    }

    /// Product id of this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Line total (price * qty).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(self.qty)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart: cart lines in insertion order, unique by product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Build a cart from stored lines, checking the cart invariants.
    ///
    /// Returns an error if any quantity is zero or over the limit, or if a
    /// product id appears twice.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.qty == 0 {
                return Err(CommerceError::InvalidQuantity(item.qty));
            }
            if item.qty > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    item.qty,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            if !seen.insert(item.id()) {
                return Err(CommerceError::DuplicateItem(item.id().get()));
            }
        }
        Ok(Self { items })
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line with quantity 1. Returns the line's new
    /// quantity.
    pub fn add_product(&mut self, product: &Product) -> Result<u32, CommerceError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == product.id) {
            let new_quantity = existing
                .qty
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.qty = new_quantity;
            return Ok(new_quantity);
        }

        self.items.push(CartItem::new(product.clone(), 1)?);
        Ok(1)
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id() != id);
        self.items.len() < len_before
    }

    /// Get the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Cart lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its lines.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart total: the sum of price * qty over all lines.
    pub fn total(&self) -> Result<Money, CommerceError> {
        Ok(self.calculate_pricing()?.grand_total)
    }

    /// Calculate the per-line and overall pricing.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let line_items = self
            .items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    product_id: item.id(),
                    unit_price: item.product.price,
                    quantity: item.qty,
                    total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let grand_total =
            Money::try_sum(line_items.iter().map(|l| &l.total)).ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            grand_total,
            item_count: self.item_count(),
            line_items,
        })
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.into_items()
    }
}
