//! Search module.
//!
//! Name search and sort orders for the product grid.

mod query;

pub use query::{CatalogQuery, SortOption};
