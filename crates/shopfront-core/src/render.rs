//! View models for the product grid and the cart table.
//!
//! Building a view model never touches its inputs; the page projects the
//! result into the DOM and rebuilds it on every change.

use serde::Serialize;
use shopfront_commerce::{Cart, CartItem, Money, Product, ProductId};

/// Text of the row shown in place of cart lines when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Number of columns in the cart table.
pub const CART_COLUMNS: usize = 5;

/// Label of the cart link in the navigation bar.
pub const CART_BADGE_LABEL: &str = "🛒 Cart";

/// Badge text for `count` units in the cart.
pub fn badge_label(count: u64) -> String {
    if count == 0 {
        CART_BADGE_LABEL.to_string()
    } else {
        format!("{} ({})", CART_BADGE_LABEL, count)
    }
}

/// One product tile in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub alt: String,
    pub price_label: String,
}

impl ProductCard {
    /// Build the tile for `product`.
    pub fn from_product(product: &Product, currency_label: &str) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            alt: product.name.clone(),
            price_label: product.price.display_with(currency_label),
        }
    }
}

/// Tiles for `products`, in order.
pub fn catalog_cards(products: &[Product], currency_label: &str) -> Vec<ProductCard> {
    products
        .iter()
        .map(|p| ProductCard::from_product(p, currency_label))
        .collect()
}

/// One line of the cart table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRow {
    pub id: ProductId,
    pub name: String,
    pub qty: u32,
    pub unit_price_label: String,
    pub line_total_label: String,
}

/// Shown in place of an amount too large to represent.
pub const UNPRICED_LABEL: &str = "n/a";

/// The cart table, its total and the navigation badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartTable {
    /// Lines in cart order.
    pub rows: Vec<CartRow>,
    /// Whether to show the empty-cart row instead of lines.
    pub empty: bool,
    /// e.g. `Total: Rs.20`.
    pub total_label: String,
    /// e.g. `🛒 Cart (2)`.
    pub badge_label: String,
    /// Sum of quantities.
    pub item_count: u64,
    /// False when a line total or the cart total overflowed.
    pub priced: bool,
}

impl CartTable {
    /// Build the table for `items`.
    ///
    /// Amounts that overflow are labelled [`UNPRICED_LABEL`]; rows, counts
    /// and the badge are always filled in.
    pub fn build(items: &[CartItem], currency_label: &str) -> Self {
        let line_totals: Vec<Option<Money>> =
            items.iter().map(|item| item.line_total().ok()).collect();
        let total = line_totals
            .iter()
            .map(Option::as_ref)
            .collect::<Option<Vec<&Money>>>()
            .and_then(|totals| Money::try_sum(totals.into_iter()));

        let rows: Vec<CartRow> = items
            .iter()
            .zip(&line_totals)
            .map(|(item, line_total)| CartRow {
                id: item.id(),
                name: item.product.name.clone(),
                qty: item.qty,
                unit_price_label: item.product.price.display_with(currency_label),
                line_total_label: amount_label(line_total.as_ref(), currency_label),
            })
            .collect();
        let item_count: u64 = items.iter().map(|i| u64::from(i.qty)).sum();

        Self {
            empty: rows.is_empty(),
            rows,
            total_label: format!("Total: {}", amount_label(total.as_ref(), currency_label)),
            badge_label: badge_label(item_count),
            item_count,
            priced: total.is_some(),
        }
    }

    /// Build the table for a whole cart.
    pub fn for_cart(cart: &Cart, currency_label: &str) -> Self {
        Self::build(cart.items(), currency_label)
    }

    /// The table of an empty cart.
    pub fn empty(currency_label: &str) -> Self {
        Self {
            rows: Vec::new(),
            empty: true,
            total_label: format!("Total: {}", Money::zero().display_with(currency_label)),
            badge_label: badge_label(0),
            item_count: 0,
            priced: true,
        }
    }
}

fn amount_label(amount: Option<&Money>, currency_label: &str) -> String {
    match amount {
        Some(amount) => amount.display_with(currency_label),
        None => UNPRICED_LABEL.to_string(),
    }
}
