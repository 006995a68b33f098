//! Keeps only the rows of the predicted category.

use crate::traits::{Filter, SelectionContext};
use anyhow::Result;
use catalog::Product;

/// Exact, case-sensitive match on `Product::category`.
pub struct CategoryFilter;

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn apply(&self, products: Vec<Product>, context: &SelectionContext) -> Result<Vec<Product>> {
        Ok(products
            .into_iter()
            .filter(|product| product.category == context.category)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter() {
        let products = vec![
            Product::new("A", "Serum", Some(4.0), "https://shop.example/a"),
            Product::new("B", "serum", Some(4.0), "https://shop.example/b"),
            Product::new("C", "Toner", Some(4.0), "https://shop.example/c"),
            Product::new("D", "Serum", None, "https://shop.example/d"),
        ];

        let kept = CategoryFilter
            .apply(products, &SelectionContext::new("Serum"))
            .unwrap();

        let names: Vec<&str> = kept.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
    }

    #[test]
    fn test_unknown_category_keeps_nothing() {
        let products = vec![Product::new("A", "Serum", Some(4.0), "https://shop.example/a")];
        let kept = CategoryFilter
            .apply(products, &SelectionContext::new("Sunscreen"))
            .unwrap();
        assert!(kept.is_empty());
    }
}
