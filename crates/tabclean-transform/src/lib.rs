//! Column classification and type-directed normalization.
//!
//! - **inference**: column name → category
//! - **normalization**: per-cell numeric, date and text conversion
//! - **executor**: column and table normalization
//! - **quality**: per-column data-quality report
//! - **frame**: polars `DataFrame` interop

pub mod error;
pub mod executor;
pub mod frame;
pub mod inference;
pub mod normalization;
pub mod quality;

pub use error::TransformError;
pub use executor::{ColumnStats, INVALID_ROW_LIMIT, NormalizedColumn, NormalizedTable, Normalizer};
pub use frame::{cell_from_any, table_from_frame, table_to_frame};
pub use inference::ColumnClassifier;
pub use normalization::{DateParser, DateStrategy, ParsedDate, parse_general, parse_numeric};
pub use quality::{ColumnQuality, TableReport, profile_column};
