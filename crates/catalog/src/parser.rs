//! Parser for the product catalog CSV.
//!
//! Expected header (extra columns are ignored):
//! `product_name,Category,Rating_Stars,Product_Url`
//!
//! Fields are trimmed; an empty `Rating_Stars` cell becomes `None`.
//! A row that can't be decoded or fails validation is skipped with a
//! warning. Unreadable files and missing columns still fail the load.

use crate::error::{CatalogError, Result};
use crate::types::Product;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::warn;

/// Columns a catalog file must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["product_name", "Category", "Rating_Stars", "Product_Url"];

const MAX_RATING: f32 = 5.0;

/// Parse a catalog file from disk
pub fn parse_products(path: &Path) -> Result<Vec<Product>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_products_from_reader(file, &file_name)
}

/// Parse catalog rows from any reader
///
/// `file` is only used to label errors.
pub fn parse_products_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Product>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| csv_error(file, e))?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut products = Vec::new();
    let mut skipped = 0usize;
    let mut record = csv::StringRecord::new();
    while rdr.read_record(&mut record).map_err(|e| csv_error(file, e))? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&record, &headers, file, line) {
            Ok(product) => products.push(product),
            Err(e) => {
                warn!("Skipping catalog row: {}", e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid rows in {}", skipped, file);
    }

    Ok(products)
}

fn parse_row(
    record: &csv::StringRecord,
    headers: &csv::StringRecord,
    file: &str,
    line: u64,
) -> Result<Product> {
    let product: Product = record
        .deserialize(Some(headers))
        .map_err(|e| CatalogError::ParseError {
            file: file.to_string(),
            line,
            reason: e.to_string(),
        })?;

    validate_product(&product, line)?;
    Ok(product)
}

fn csv_error(file: &str, e: csv::Error) -> CatalogError {
    CatalogError::ParseError {
        file: file.to_string(),
        line: e.position().map(|p| p.line()).unwrap_or(0),
        reason: e.to_string(),
    }
}

/// Reject rows we can't list: blank names or categories, out of range ratings
fn validate_product(product: &Product, line: u64) -> Result<()> {
    if product.name.is_empty() {
        return Err(CatalogError::InvalidValue {
            field: "product_name".to_string(),
            value: String::new(),
            line,
        });
    }
    if product.category.is_empty() {
        return Err(CatalogError::InvalidValue {
            field: "Category".to_string(),
            value: String::new(),
            line,
        });
    }
    if let Some(rating) = product.rating {
        // NaN fails the range check too
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(CatalogError::InvalidValue {
                field: "Rating_Stars".to_string(),
                value: rating.to_string(),
                line,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "product_name,Category,Rating_Stars,Product_Url\n";

    #[test]
    fn test_parse_rows_in_order() {
        let data = format!(
            "{HEADER}Hydra Gel,Moisturizer,4.5,https://shop.example/hydra\n\
             Clay Wash,Cleanser,3.9,https://shop.example/clay\n"
        );
        let products = parse_products_from_reader(data.as_bytes(), "inline.csv").unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Hydra Gel");
        assert_eq!(products[0].category, "Moisturizer");
        assert_eq!(products[0].rating, Some(4.5));
        assert_eq!(products[1].url, "https://shop.example/clay");
    }

    #[test]
    fn test_empty_rating_is_unrated() {
        let data = format!("{HEADER}Plain Balm,Moisturizer,,https://shop.example/balm\n");
        let products = parse_products_from_reader(data.as_bytes(), "inline.csv").unwrap();
        assert_eq!(products[0].rating, None);
    }

    #[test]
    fn test_extra_columns_and_order_are_tolerated() {
        let data = "Brand,Product_Url,Rating_Stars,Category,product_name\n\
                    Acme,https://shop.example/a,4.1,Serum,Vit C Drops\n";
        let products = parse_products_from_reader(data.as_bytes(), "inline.csv").unwrap();
        assert_eq!(products[0].name, "Vit C Drops");
        assert_eq!(products[0].category, "Serum");
    }

    #[test]
    fn test_missing_column() {
        let data = "product_name,Category,Product_Url\nA,B,C\n";
        let err = parse_products_from_reader(data.as_bytes(), "inline.csv").unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn { ref column, .. } if column == "Rating_Stars"));
    }

    #[test]
    fn test_undecodable_rows_are_skipped() {
        let data = format!(
            "{HEADER}Good,Toner,4.0,https://shop.example/g\n\
             Bad,Toner,lots,https://shop.example/b\n\
             Short,Toner\n\
             Also Good,Serum,3.5,https://shop.example/a\n"
        );
        let products = parse_products_from_reader(data.as_bytes(), "inline.csv").unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Also Good"]);
    }

    #[test]
    fn test_invalid_values_are_skipped() {
        let data = format!(
            "{HEADER}Loud,Toner,7.5,https://shop.example/l\n\
             ,Toner,4.0,https://shop.example/nameless\n\
             Loose,,4.0,https://shop.example/loose\n\
             Kept,Toner,5,https://shop.example/k\n"
        );
        let products = parse_products_from_reader(data.as_bytes(), "inline.csv").unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Kept");
        assert_eq!(products[0].rating, Some(5.0));
    }

    #[test]
    fn test_row_errors_name_their_line() {
        let headers = csv::StringRecord::from(REQUIRED_COLUMNS.to_vec());
        let record = csv::StringRecord::from(vec!["Bad", "Toner", "lots", "https://shop.example/b"]);
        match parse_row(&record, &headers, "inline.csv", 3) {
            Err(CatalogError::ParseError { line, file, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(file, "inline.csv");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let record = csv::StringRecord::from(vec!["Loud", "Toner", "7.5", "https://shop.example/l"]);
        let err = parse_row(&record, &headers, "inline.csv", 2).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidValue { ref field, line: 2, .. } if field == "Rating_Stars"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_products(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
