//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading the product catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A row couldn't be decoded into a product
    ///
    /// `line` is the 1-based line in the file (the header is line 1)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// The header row is missing a required column
    #[error("Missing column {column} in {file}")]
    MissingColumn { file: String, column: String },

    /// A field decoded fine but holds a value we refuse to serve
    #[error("Invalid value for {field} at line {line}: {value}")]
    InvalidValue {
        field: String,
        value: String,
        line: u64,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
