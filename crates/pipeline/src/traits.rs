//! Core traits for the selection pipeline.
//!
//! A `Filter` narrows a list of catalog rows. Filters are composed by
//! [`FilterPipeline`](crate::FilterPipeline) and run in insertion order.

use anyhow::Result;
use catalog::Product;

/// What a selection request is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    /// Predicted category the products must belong to
    pub category: String,
}

impl SelectionContext {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

/// Core trait for filtering products.
///
/// Filters take ownership of the rows and return the ones they keep, in the
/// order they received them.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    fn apply(&self, products: Vec<Product>, context: &SelectionContext) -> Result<Vec<Product>>;
}
