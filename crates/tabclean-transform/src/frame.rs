//! Conversion between polars frames and [`Table`]s.

use chrono::{DateTime, NaiveDate};
use polars::prelude::{AnyValue, Column as FrameColumn, DataFrame, PolarsResult, TimeUnit};
use tabclean_model::{Cell, Column, ColumnValues, Table};

use crate::error::Result;

/// Convert one polars value to a raw cell.
///
/// Strings stay text; integers and floats keep their numeric type; polars
/// dates and datetimes become typed date cells. Any other value is rendered
/// to text.
pub fn cell_from_any(value: AnyValue) -> Cell {
    match value {
        AnyValue::Null => Cell::Null,
        AnyValue::String(s) => Cell::Text(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
        AnyValue::Boolean(b) => Cell::Text(b.to_string()),
        AnyValue::Int32(v) => Cell::Int(i64::from(v)),
        AnyValue::Int64(v) => Cell::Int(v),
        AnyValue::UInt32(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Cell::Float(v as f64), Cell::Int),
        AnyValue::Float32(v) => Cell::from(f64::from(v)),
        AnyValue::Float64(v) => Cell::from(v),
        AnyValue::Date(days) => days_to_date(days).map_or(Cell::Null, Cell::Date),
        AnyValue::Datetime(v, unit, _) => {
            let parsed = match unit {
                TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
                TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
                TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
            };
            parsed.map_or(Cell::Null, |dt| Cell::DateTime(dt.naive_utc()))
        }
        other => Cell::Text(other.to_string()),
    }
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0).map(|dt| dt.date_naive())
}

/// Build a raw table from a frame, one [`Cell`] per value.
pub fn table_from_frame(df: &DataFrame) -> Result<Table> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let mut cells = Vec::with_capacity(column.len());
        for idx in 0..column.len() {
            cells.push(cell_from_any(column.get(idx)?));
        }
        columns.push(Column::new(column.name().as_str(), ColumnValues::Raw(cells)));
    }
    Ok(Table::new(columns)?)
}

/// Build a frame from a table.
///
/// Numeric columns become `Float64`, dates `Date`, timestamps
/// `Datetime(ms)` and text `String`; missing markers become nulls. Raw
/// columns are rendered as strings.
pub fn table_to_frame(table: &Table) -> PolarsResult<DataFrame> {
    let columns = table.columns().iter().map(frame_column).collect();
    DataFrame::new(columns)
}

fn frame_column(column: &Column) -> FrameColumn {
    let name = column.name().into();
    match column.values() {
        ColumnValues::Numeric(v) => FrameColumn::new(name, v),
        ColumnValues::Date(v) => FrameColumn::new(name, v),
        ColumnValues::DateTime(v) => FrameColumn::new(name, v),
        ColumnValues::Text(v) => FrameColumn::new(name, v),
        ColumnValues::Raw(v) => {
            FrameColumn::new(name, v.iter().map(Cell::render).collect::<Vec<_>>())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    #[test]
    fn test_cell_from_any() {
        assert_eq!(cell_from_any(AnyValue::Null), Cell::Null);
        assert_eq!(cell_from_any(AnyValue::String(" a ")), Cell::from(" a "));
        assert_eq!(cell_from_any(AnyValue::Int64(202501)), Cell::Int(202501));
        assert_eq!(cell_from_any(AnyValue::Float64(f64::NAN)), Cell::Null);
        assert_eq!(
            cell_from_any(AnyValue::Date(0)),
            Cell::Date(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
        );
        assert_eq!(
            cell_from_any(AnyValue::Datetime(86_400_000, TimeUnit::Milliseconds, None)),
            Cell::DateTime(
                NaiveDate::from_ymd_opt(1970, 1, 2)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_frame_dtypes() {
        let table = Table::new(vec![
            Column::new("amt_no", ColumnValues::Numeric(vec![Some(1.0), None])),
            Column::new(
                "reg_ym",
                ColumnValues::Date(vec![NaiveDate::from_ymd_opt(2025, 1, 1), None]),
            ),
            Column::new("memo", ColumnValues::Text(vec![None, Some("x".to_string())])),
            Column::raw("raw", [Cell::Int(1), Cell::Null]),
        ])
        .unwrap();
        let df = table_to_frame(&table).unwrap();
        assert_eq!(df.shape(), (2, 4));
        assert_eq!(df.column("amt_no").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("reg_ym").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("memo").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("raw").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("amt_no").unwrap().null_count(), 1);
    }
}
