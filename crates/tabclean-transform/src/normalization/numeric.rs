//! Numeric conversion.
//!
//! Parsing is strict: no thousands separators, currency symbols or units are
//! removed here. Separator stripping belongs to ingestion, so values that were
//! already stripped upstream parse unchanged.

use tabclean_model::{BadValueSet, Cell, CellOutcome};

use super::{PreparedCell, prepare};

/// Parse a string value to `f64`.
///
/// Accepts standard and scientific notation (`"42"`, `" -0.5 "`, `"1.5e3"`).
/// Returns None for empty strings, malformed numbers and NaN spellings.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Convert one cell of a numeric column.
pub fn normalize_numeric_cell(cell: &Cell, bad_values: &BadValueSet) -> CellOutcome<f64> {
    match prepare(cell, bad_values) {
        PreparedCell::Absent => CellOutcome::Absent,
        PreparedCell::Text(text) => CellOutcome::from_parse(parse_numeric(text)),
        PreparedCell::Int(v) => CellOutcome::Valid(v as f64),
        PreparedCell::Float(v) => CellOutcome::Valid(v),
        PreparedCell::Date(_) | PreparedCell::DateTime(_) => CellOutcome::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_numbers() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric(" 3.25 "), Some(3.25));
        assert_eq!(parse_numeric("-0.5"), Some(-0.5));
        assert_eq!(parse_numeric("1.5E-3"), Some(0.0015));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert_eq!(parse_numeric("4-"), None);
        assert_eq!(parse_numeric("4*"), None);
        assert_eq!(parse_numeric("12.34.56"), None);
        assert_eq!(parse_numeric("abc"), None);
    }

    #[test]
    fn test_separators_not_stripped() {
        assert_eq!(parse_numeric("1,234"), None);
        assert_eq!(parse_numeric("1234"), Some(1234.0));
    }

    #[test]
    fn test_nan_spellings_rejected() {
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("-nan"), None);
    }

    #[test]
    fn test_cell_conversion() {
        let bad = BadValueSet::default();
        assert_eq!(
            normalize_numeric_cell(&Cell::Int(3), &bad),
            CellOutcome::Valid(3.0)
        );
        assert_eq!(
            normalize_numeric_cell(&Cell::from(" 2 "), &bad),
            CellOutcome::Valid(2.0)
        );
        assert_eq!(
            normalize_numeric_cell(&Cell::from("4*"), &bad),
            CellOutcome::Invalid
        );
        assert_eq!(
            normalize_numeric_cell(&Cell::from("*"), &bad),
            CellOutcome::Absent
        );
    }
}
