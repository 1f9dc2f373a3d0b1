//! Raw cell values and per-cell conversion outcomes.
//!
//! Every raw value is tagged once at ingestion ([`Cell`]); normalizers match on
//! the tag instead of inspecting runtime types. Conversion results are
//! [`CellOutcome`] values so that "nothing there" and "could not parse" stay
//! distinguishable without using errors for control flow.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for timestamps; fractional seconds only when non-zero.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A raw table cell as delivered by the I/O layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Any upstream missing marker.
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Returns true for `Null` and for float NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Canonical text form of the cell, or `None` when missing.
    ///
    /// Integral floats render without a fractional part (`202501.0` → `202501`),
    /// which lets numeric literals take the same parse path as text.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Int(v) => Some(v.to_string()),
            Cell::Float(v) if v.is_nan() => None,
            Cell::Float(v) => Some(format_numeric(*v)),
            Cell::Text(s) => Some(s.clone()),
            Cell::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
            Cell::DateTime(dt) => Some(dt.format(DATETIME_FORMAT).to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

/// Formats a floating-point number without a trailing `.0`.
pub fn format_numeric(v: f64) -> String {
    // f64 Display never emits trailing zeros or exponents.
    format!("{v}")
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Cell::Null
        } else {
            Cell::Float(value)
        }
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::DateTime(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// Result of converting one cell to a target type.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome<T> {
    /// Null input or a bad-value sentinel.
    Absent,
    /// Present but not convertible to the target type.
    Invalid,
    /// Successfully converted.
    Valid(T),
}

impl<T> CellOutcome<T> {
    /// The converted value; `Absent` and `Invalid` both become `None`.
    pub fn value(self) -> Option<T> {
        match self {
            CellOutcome::Valid(value) => Some(value),
            CellOutcome::Absent | CellOutcome::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CellOutcome::Invalid)
    }

    /// Builds an outcome from an optional parse result of a present value.
    pub fn from_parse(parsed: Option<T>) -> Self {
        parsed.map_or(CellOutcome::Invalid, CellOutcome::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_numeric_literals() {
        assert_eq!(Cell::Int(202501).render().as_deref(), Some("202501"));
        assert_eq!(
            Cell::Float(20250101121212.0).render().as_deref(),
            Some("20250101121212")
        );
        assert_eq!(Cell::Float(2.5).render().as_deref(), Some("2.5"));
        assert_eq!(Cell::Float(10.0).render().as_deref(), Some("10"));
    }

    #[test]
    fn test_nan_is_missing() {
        assert!(Cell::Float(f64::NAN).is_missing());
        assert!(Cell::from(f64::NAN).is_missing());
        assert!(Cell::Null.is_missing());
        assert!(!Cell::from("").is_missing());
    }

    #[test]
    fn test_render_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(Cell::Date(date).render().as_deref(), Some("2025-03-02"));
        let dt = date.and_hms_opt(14, 14, 14).unwrap();
        assert_eq!(
            Cell::DateTime(dt).render().as_deref(),
            Some("2025-03-02 14:14:14")
        );
    }

    #[test]
    fn test_outcome_value() {
        assert_eq!(CellOutcome::Valid(3).value(), Some(3));
        assert_eq!(CellOutcome::<i32>::Invalid.value(), None);
        assert!(CellOutcome::<i32>::from_parse(None).is_invalid());
    }
}
