//! Drops repeated product names.

use crate::traits::{Filter, SelectionContext};
use anyhow::Result;
use catalog::Product;
use std::collections::HashSet;

/// Keeps the first row seen for each product name.
///
/// Runs before ranking, so a later duplicate with a higher rating is still
/// dropped.
pub struct UniqueNameFilter;

impl Filter for UniqueNameFilter {
    fn name(&self) -> &str {
        "UniqueNameFilter"
    }

    fn apply(&self, products: Vec<Product>, _context: &SelectionContext) -> Result<Vec<Product>> {
        let mut seen = HashSet::with_capacity(products.len());
        Ok(products
            .into_iter()
            .filter(|product| seen.insert(product.name.clone()))
            .collect())
    }
}
