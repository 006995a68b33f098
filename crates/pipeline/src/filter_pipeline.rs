//! Chains filters together with the builder pattern.

use crate::traits::{Filter, SelectionContext};
use anyhow::Result;
use catalog::Product;
use tracing::debug;

/// Runs a sequence of filters over catalog rows.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(CategoryFilter)
///     .add_filter(UniqueNameFilter);
///
/// let rows = catalog.products_in_category(&context.category).cloned().collect();
/// let kept = pipeline.apply(rows, &context)?;
/// ```
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter to the pipeline (builder pattern)
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, stopping at the first error
    pub fn apply(&self, products: Vec<Product>, context: &SelectionContext) -> Result<Vec<Product>> {
        let mut current = products;
        for filter in &self.filters {
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}
