//! Columns and tables.
//!
//! A [`Table`] exclusively owns its columns. Normalization replaces a column's
//! [`ColumnValues`] with a typed representation at the same position, never
//! changing the column count or the row count.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::cell::{Cell, DATE_FORMAT, DATETIME_FORMAT, format_numeric};
use crate::error::{NormalizeError, Result};

/// Values of one column, raw or normalized.
///
/// In the typed variants `None` is the missing marker of that type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValues {
    Raw(Vec<Cell>),
    Numeric(Vec<Option<f64>>),
    Date(Vec<Option<NaiveDate>>),
    DateTime(Vec<Option<NaiveDateTime>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Raw(v) => v.len(),
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Date(v) => v.len(),
            ColumnValues::DateTime(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The category a typed column was normalized to; `None` for raw values.
    pub fn category(&self) -> Option<Category> {
        match self {
            ColumnValues::Raw(_) => None,
            ColumnValues::Numeric(_) => Some(Category::Numeric),
            ColumnValues::Date(_) | ColumnValues::DateTime(_) => Some(Category::Date),
            ColumnValues::Text(_) => Some(Category::Text),
        }
    }

    /// The value at `idx` viewed as a raw cell.
    pub fn cell(&self, idx: usize) -> Option<Cell> {
        match self {
            ColumnValues::Raw(v) => v.get(idx).cloned(),
            ColumnValues::Numeric(v) => v.get(idx).map(|value| Cell::from(*value)),
            ColumnValues::Date(v) => v.get(idx).map(|value| Cell::from(*value)),
            ColumnValues::DateTime(v) => v.get(idx).map(|value| Cell::from(*value)),
            ColumnValues::Text(v) => v.get(idx).map(|value| Cell::from(value.clone())),
        }
    }

    /// Iterates the column as raw cells, in row order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).filter_map(move |idx| self.cell(idx))
    }

    /// Number of missing markers in the column.
    pub fn missing_count(&self) -> usize {
        match self {
            ColumnValues::Raw(v) => v.iter().filter(|cell| cell.is_missing()).count(),
            ColumnValues::Numeric(v) => v.iter().filter(|value| value.is_none()).count(),
            ColumnValues::Date(v) => v.iter().filter(|value| value.is_none()).count(),
            ColumnValues::DateTime(v) => v.iter().filter(|value| value.is_none()).count(),
            ColumnValues::Text(v) => v.iter().filter(|value| value.is_none()).count(),
        }
    }

    /// Text form of the value at `idx`, with the type's missing marker
    /// (`NaN`, `NaT`, `<NA>`, `null`) for absent values.
    pub fn display_value(&self, idx: usize) -> Option<String> {
        let rendered = match self {
            ColumnValues::Raw(v) => v.get(idx)?.to_string(),
            ColumnValues::Numeric(v) => match v.get(idx)? {
                Some(value) => format_numeric(*value),
                None => "NaN".to_string(),
            },
            ColumnValues::Date(v) => match v.get(idx)? {
                Some(value) => value.format(DATE_FORMAT).to_string(),
                None => "NaT".to_string(),
            },
            ColumnValues::DateTime(v) => match v.get(idx)? {
                Some(value) => value.format(DATETIME_FORMAT).to_string(),
                None => "NaT".to_string(),
            },
            ColumnValues::Text(v) => match v.get(idx)? {
                Some(value) => value.clone(),
                None => "<NA>".to_string(),
            },
        };
        Some(rendered)
    }
}

impl fmt::Display for ColumnValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for idx in 0..self.len() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            if let Some(value) = self.display_value(idx) {
                f.write_str(&value)?;
            }
        }
        f.write_str("]")
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a raw column from anything convertible to cells.
    pub fn raw<I, T>(name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cell>,
    {
        Self::new(
            name,
            ColumnValues::Raw(cells.into_iter().map(Into::into).collect()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_parts(self) -> (String, ColumnValues) {
        (self.name, self.values)
    }
}

/// An ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Create a table, rejecting ragged columns and duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, Column::len);
        check_shape(&columns, height)?;
        Ok(Self { columns, height })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Verify that every column still matches the table height.
    pub fn validate(&self) -> Result<()> {
        check_shape(&self.columns, self.height)
    }
}

fn check_shape(columns: &[Column], height: usize) -> Result<()> {
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(column.name()) {
            return Err(NormalizeError::DuplicateColumn(column.name().to_string()));
        }
        if column.len() != height {
            return Err(NormalizeError::ShapeMismatch {
                column: column.name().to_string(),
                expected: height,
                actual: column.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_table_rejected() {
        let result = Table::new(vec![
            Column::raw("a", [1, 2, 3]),
            Column::raw("b", ["x", "y"]),
        ]);
        assert_eq!(
            result,
            Err(NormalizeError::ShapeMismatch {
                column: "b".to_string(),
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = Table::new(vec![Column::raw("a", [1]), Column::raw("a", [2])]);
        assert_eq!(result, Err(NormalizeError::DuplicateColumn("a".to_string())));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.height(), 0);
        assert_eq!(table.width(), 0);
    }

    #[test]
    fn test_display_missing_markers() {
        assert_eq!(
            ColumnValues::Numeric(vec![Some(1.0), None, Some(2.5)]).to_string(),
            "[1, NaN, 2.5]"
        );
        assert_eq!(ColumnValues::Date(vec![None]).to_string(), "[NaT]");
        assert_eq!(
            ColumnValues::Text(vec![Some("a".into()), None]).to_string(),
            "[a, <NA>]"
        );
    }

    #[test]
    fn test_typed_values_view_as_cells() {
        let values = ColumnValues::Numeric(vec![Some(1.0), None]);
        let cells: Vec<Cell> = values.cells().collect();
        assert_eq!(cells, vec![Cell::Float(1.0), Cell::Null]);
        assert_eq!(values.missing_count(), 1);
    }
}
