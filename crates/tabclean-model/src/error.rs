//! Error types for table construction and normalization configuration.

use thiserror::Error;

/// Fatal errors raised before any column is normalized.
///
/// Per-cell parse failures are never errors; they become missing markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    // === Configuration Errors ===
    /// A category name outside {numeric, date, text}.
    #[error("unknown column category '{0}' (expected numeric, date or text)")]
    UnknownCategory(String),

    /// No fallback formats and the permissive parser is disabled.
    #[error("date fallback format list is empty and permissive parsing is disabled")]
    EmptyFormatList,

    /// A fallback format that chrono cannot interpret.
    #[error("invalid date format '{format}'")]
    InvalidDateFormat { format: String },

    /// Keyword ruleset that cannot classify anything sensibly.
    #[error("malformed ruleset: {0}")]
    InvalidRuleset(String),

    // === Shape Errors ===
    /// Column length disagrees with the table row count.
    #[error("column '{column}' has {actual} rows but the table has {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

impl NormalizeError {
    /// Returns true for errors caused by configuration rather than table shape.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory(_)
                | Self::EmptyFormatList
                | Self::InvalidDateFormat { .. }
                | Self::InvalidRuleset(_)
        )
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NormalizeError::ShapeMismatch {
            column: "col_no1".to_string(),
            expected: 5,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "column 'col_no1' has 4 rows but the table has 5"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(NormalizeError::EmptyFormatList.is_configuration());
        assert!(NormalizeError::UnknownCategory("blob".into()).is_configuration());
        assert!(!NormalizeError::DuplicateColumn("a".into()).is_configuration());
    }
}
