//! # Catalog Crate
//!
//! Loads the static product catalog that recommendations are drawn from.
//!
//! ## Main Components
//!
//! - **types**: `Product` rows and the in-memory `Catalog`
//! - **parser**: CSV decoding and per-row validation
//! - **index**: file loading and category statistics
//! - **error**: error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/skincare_products.csv"))?;
//! for product in catalog.products_in_category("Moisturizer") {
//!     println!("{} ({:?})", product.name, product.rating);
//! }
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{CatalogError, Result};
pub use types::{Catalog, Category, Product};
