//! Error type for the transform crate.

use polars::prelude::PolarsError;
use tabclean_model::NormalizeError;
use thiserror::Error;

/// Errors raised while moving tables in and out of polars or normalizing them.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// A polars operation failed while converting a frame.
    #[error("frame conversion failed: {0}")]
    Frame(#[from] PolarsError),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
