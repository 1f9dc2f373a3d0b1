//! Per-cell normalization functions.
//!
//! Every category shares the same preprocessing ([`prepare`]):
//! - **missing** cells (null, float NaN) become absent
//! - **text** is trimmed, and sentinel strings from the bad-value set become absent
//!
//! The category modules then convert what is left:
//! - **numeric**: strict number parsing
//! - **datetime**: permissive parser followed by the strict fallback formats
//! - **text**: trimmed strings, non-text cells rendered as text

pub mod datetime;
pub mod numeric;
pub mod text;

use chrono::{NaiveDate, NaiveDateTime};
use tabclean_model::{BadValueSet, Cell};

pub use datetime::{DateParser, DateStrategy, ParsedDate, parse_general, parse_with_format};
pub use numeric::{normalize_numeric_cell, parse_numeric};
pub use text::normalize_text_cell;

/// A cell after the preprocessing shared by all categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreparedCell<'a> {
    /// Null, NaN, or a bad-value sentinel.
    Absent,
    /// Trimmed text that is not a sentinel.
    Text(&'a str),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// Apply the common preprocessing steps to a raw cell.
///
/// Only textual cells are compared against the bad-value set; typed cells
/// already carry a value of their own type.
pub fn prepare<'a>(cell: &'a Cell, bad_values: &BadValueSet) -> PreparedCell<'a> {
    match cell {
        Cell::Null => PreparedCell::Absent,
        Cell::Float(v) if v.is_nan() => PreparedCell::Absent,
        Cell::Float(v) => PreparedCell::Float(*v),
        Cell::Int(v) => PreparedCell::Int(*v),
        Cell::Date(d) => PreparedCell::Date(*d),
        Cell::DateTime(dt) => PreparedCell::DateTime(*dt),
        Cell::Text(raw) => {
            let trimmed = raw.trim();
            if bad_values.contains(trimmed) {
                PreparedCell::Absent
            } else {
                PreparedCell::Text(trimmed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_masks_padded_sentinels() {
        let bad = BadValueSet::default();
        for raw in ["  *  ", "None", " NULL", "nan ", "-", "", "   "] {
            let cell = Cell::from(raw);
            assert_eq!(prepare(&cell, &bad), PreparedCell::Absent, "{raw:?}");
        }
    }

    #[test]
    fn test_prepare_trims_text() {
        let bad = BadValueSet::default();
        let cell = Cell::from("  abc \t");
        assert_eq!(prepare(&cell, &bad), PreparedCell::Text("abc"));
    }

    #[test]
    fn test_prepare_passes_typed_values() {
        let bad = BadValueSet::default();
        assert_eq!(prepare(&Cell::Int(7), &bad), PreparedCell::Int(7));
        assert_eq!(prepare(&Cell::Float(f64::NAN), &bad), PreparedCell::Absent);
        assert_eq!(prepare(&Cell::Null, &bad), PreparedCell::Absent);
    }
}
