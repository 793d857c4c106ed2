//! Cart pricing calculations.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of all line totals.
    pub grand_total: Money,
    /// Sum of quantities.
    pub item_count: u64,
    /// Per-line pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product on this line.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// Line total (unit_price * quantity).
    pub total: Money,
}
