//! Core domain types for the product catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category label shared by products and classifier predictions
pub type Category = String;

/// A single product row from the catalog.
///
/// Field names follow the catalog's column headers, so the struct can be
/// deserialized straight from a CSV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_name")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: Category,

    /// Star rating; `None` when the cell is empty
    #[serde(rename = "Rating_Stars")]
    pub rating: Option<f32>,

    #[serde(rename = "Product_Url")]
    pub url: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<Category>,
        rating: Option<f32>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            rating,
            url: url.into(),
        }
    }

    /// Rating as written in the catalog, or `N/A` when unrated.
    ///
    /// `{:?}` keeps the decimal point on whole ratings (`5.0`).
    pub fn rating_label(&self) -> String {
        self.rating
            .map(|r| format!("{:?}", r))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// In-memory, read-only product table.
///
/// Rows are kept in file order; `category_index` maps a category to the
/// positions of its rows so category lookups preserve that order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) products: Vec<Product>,
    pub(crate) category_index: HashMap<Category, Vec<usize>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from rows already in memory (keeps their order)
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert_product(product);
        }
        catalog
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products of one category, in catalog order
    pub fn products_in_category<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = &'a Product> + use<'a> {
        self.category_index
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&idx| &self.products[idx])
    }

    /// Distinct categories, sorted for stable output
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.category_index.keys().map(|c| c.as_str()).collect();
        categories.sort_unstable();
        categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Append a product and index it by category
    pub fn insert_product(&mut self, product: Product) {
        let idx = self.products.len();
        self.category_index
            .entry(product.category.clone())
            .or_insert_with(Vec::new)
            .push(idx);
        self.products.push(product);
    }
}
