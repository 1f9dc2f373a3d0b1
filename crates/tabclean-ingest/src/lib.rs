//! Delimited file ingestion for the normalization pipeline.
//!
//! # Features
//!
//! - **Loading**: read CSV/TSV files with polars, every column as text
//! - **Thousands separators**: optional removal of `1,234`-style grouping
//! - **Writing**: write normalized frames back to CSV/TSV
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabclean_ingest::{ReadOptions, read_delimited};
//!
//! let df = read_delimited(Path::new("claims.tsv"), &ReadOptions::default())?;
//! ```

mod csv;
mod error;
mod thousands;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading and Writing ===
pub use csv::{
    Delimiter, MAX_FILE_SIZE, ReadOptions, check_file_size_with_limit, read_delimited,
    validate_dataframe_shape, validate_encoding, write_delimited,
};

// === Cleanup ===
pub use thousands::{strip_thousands_in_frame, strip_thousands_separators};
