//! Free-text normalization: trim and mask sentinels, nothing else.

use tabclean_model::{BadValueSet, Cell, CellOutcome, DATE_FORMAT, DATETIME_FORMAT, format_numeric};

use super::{PreparedCell, prepare};

/// Convert one cell of a text column.
///
/// Numeric-looking strings are not coerced; typed cells are rendered as text.
pub fn normalize_text_cell(cell: &Cell, bad_values: &BadValueSet) -> CellOutcome<String> {
    match prepare(cell, bad_values) {
        PreparedCell::Absent => CellOutcome::Absent,
        PreparedCell::Text(text) => CellOutcome::Valid(text.to_string()),
        PreparedCell::Int(v) => CellOutcome::Valid(v.to_string()),
        PreparedCell::Float(v) => CellOutcome::Valid(format_numeric(v)),
        PreparedCell::Date(d) => CellOutcome::Valid(d.format(DATE_FORMAT).to_string()),
        PreparedCell::DateTime(dt) => CellOutcome::Valid(dt.format(DATETIME_FORMAT).to_string()),
    }
}
