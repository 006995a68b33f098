//! Selection of catalog products for a predicted category.
//!
//! This crate provides:
//! - `Filter` trait and implementations for narrowing catalog rows
//! - `FilterPipeline` for composing filters
//! - `RecommendationSelector` for ranking and truncating the result
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RecommendationSelector, Selection};
//!
//! let selector = RecommendationSelector::default();
//! match selector.select(Some(&catalog), "Moisturizer")? {
//!     Selection::Products { products, .. } => { /* render */ }
//!     Selection::NoMatches { category } => { /* apologize */ }
//!     Selection::CatalogUnavailable => { /* data unavailable */ }
//! }
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod selector;
pub mod traits;

pub use filter_pipeline::FilterPipeline;
pub use selector::{DEFAULT_LIMIT, RecommendationSelector, Selection};
pub use traits::{Filter, SelectionContext};
