//! Filter implementations for the selection pipeline.

pub mod category;
pub mod unique_name;

pub use category::CategoryFilter;
pub use unique_name::UniqueNameFilter;
