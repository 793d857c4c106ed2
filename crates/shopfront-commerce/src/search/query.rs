//! Product grid query: name search plus sort order.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort options for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
}

impl SortOption {
    /// All options, in the order the sort control lists them.
    pub const ALL: [SortOption; 5] = [
        SortOption::Featured,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    /// Value used by the sort `<select>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
        }
    }

    /// Label shown in the sort control.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
        }
    }

    /// Parse a `<select>` value. Unknown values fall back to catalog order.
    pub fn from_select(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Compare two products under this ordering.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceAsc => a.price.cmp(&b.price),
            SortOption::PriceDesc => b.price.cmp(&a.price),
            SortOption::NameAsc => collate(&a.name, &b.name),
            SortOption::NameDesc => collate(&b.name, &a.name),
        }
    }
}

impl FromStr for SortOption {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(SortOption::Featured),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "name-asc" => Ok(SortOption::NameAsc),
            "name-desc" => Ok(SortOption::NameDesc),
            _ => Err(()),
        }
    }
}

/// Human-friendly name ordering: case-insensitive, then by raw string so the
/// result is total and deterministic.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// What the product grid currently shows.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogQuery {
    /// Search term as typed.
    pub term: String,
    /// Sort option.
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Create an empty query (everything, catalog order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Whether the query filters anything out.
    pub fn has_term(&self) -> bool {
        !self.term.trim().is_empty()
    }

    /// Filter and sort `products`, leaving the input untouched.
    ///
    /// The term is matched as typed, surrounding spaces included; a blank
    /// term matches everything. Sorting is stable, so ties keep catalog
    /// order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.term.to_lowercase();
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| !self.has_term() || p.name_contains(&needle))
            .cloned()
            .collect();

        if self.sort != SortOption::Featured {
            matched.sort_by(|a, b| self.sort.compare(a, b));
        }
        matched
    }
}
