//! Catalog loading and integrity checks.

use crate::error::Result;
use crate::parser;
use crate::types::Catalog;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Load the product catalog from a CSV file
    ///
    /// Steps:
    /// 1. Parse every row, skipping the ones that fail validation
    /// 2. Insert rows in file order, indexing by category
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading product catalog from {:?}", path);

        let products = parser::parse_products(path)?;
        let catalog = Catalog::from_products(products);

        info!(
            "Loaded {} products across {} categories",
            catalog.len(),
            catalog.category_index.len()
        );
        for (category, count) in catalog.category_counts() {
            debug!("Category {}: {} products", category, count);
        }

        Ok(catalog)
    }

    /// Number of rows per category
    pub fn category_counts(&self) -> HashMap<&str, usize> {
        self.category_index
            .iter()
            .map(|(category, rows)| (category.as_str(), rows.len()))
            .collect()
    }
}
