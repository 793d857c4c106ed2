//! Product catalog module.
//!
//! The catalog is a flat list of products published as a static JSON array.

mod product;

pub use product::Product;

use crate::ids::ProductId;
use std::collections::HashSet;

/// Look up a product by id.
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Drop repeated ids, keeping the first occurrence of each.
///
/// Returns the deduplicated list and the ids that were dropped.
pub fn dedupe_products(products: Vec<Product>) -> (Vec<Product>, Vec<ProductId>) {
    let mut seen = HashSet::with_capacity(products.len());
    let mut dropped = Vec::new();
    let kept = products
        .into_iter()
        .filter(|p| {
            if seen.insert(p.id) {
                true
            } else {
                dropped.push(p.id);
                false
            }
        })
        .collect();
    (kept, dropped)
}
