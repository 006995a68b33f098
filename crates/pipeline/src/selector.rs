//! Picks the products shown for a predicted category.
//!
//! ## Algorithm
//! 1. Take the rows of the predicted category from the catalog's index
//! 2. Drop repeated names, first occurrence wins
//! 3. Stable sort by rating, highest first, unrated rows last
//! 4. Keep the first `limit` rows
//!
//! Rows with equal ratings stay in catalog order.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{CategoryFilter, UniqueNameFilter};
use crate::traits::SelectionContext;
use anyhow::{Context, Result};
use catalog::{Catalog, Product};
use std::cmp::Ordering;
use tracing::debug;

/// Number of products shown per recommendation
pub const DEFAULT_LIMIT: usize = 3;

/// Outcome of a selection request
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Between one and `limit` products, best first
    Products {
        category: String,
        products: Vec<Product>,
    },
    /// The catalog has no rows for the category
    NoMatches { category: String },
    /// No catalog was loaded
    CatalogUnavailable,
}

impl Selection {
    pub fn products(&self) -> &[Product] {
        match self {
            Selection::Products { products, .. } => products,
            _ => &[],
        }
    }
}

pub struct RecommendationSelector {
    pipeline: FilterPipeline,
    limit: usize,
}

impl RecommendationSelector {
    pub fn new(limit: usize) -> Self {
        Self {
            pipeline: FilterPipeline::new()
                .add_filter(CategoryFilter)
                .add_filter(UniqueNameFilter),
            limit,
        }
    }

    /// Replace the filter stage, e.g. to add extra filters
    pub fn with_pipeline(mut self, pipeline: FilterPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn select(&self, catalog: Option<&Catalog>, category: &str) -> Result<Selection> {
        let Some(catalog) = catalog else {
            debug!("No catalog loaded, skipping selection");
            return Ok(Selection::CatalogUnavailable);
        };

        let context = SelectionContext::new(category);
        let candidates: Vec<Product> = catalog.products_in_category(category).cloned().collect();
        debug!(
            "{} of {} catalog rows in category {}",
            candidates.len(),
            catalog.len(),
            category
        );

        let mut products = self
            .pipeline
            .apply(candidates, &context)
            .with_context(|| format!("Failed to filter products for category {}", category))?;

        if products.is_empty() {
            return Ok(Selection::NoMatches {
                category: category.to_string(),
            });
        }

        products.sort_by(|a, b| by_rating_desc(a.rating, b.rating));
        products.truncate(self.limit);
        debug!("Selected {} products for {}", products.len(), category);

        Ok(Selection::Products {
            category: category.to_string(),
            products,
        })
    }
}

impl Default for RecommendationSelector {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

fn by_rating_desc(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
