//! Data-quality profile of normalized columns.
//!
//! Computed from the normalized values, so every count refers to missing
//! markers after bad-value masking and conversion.

use std::collections::HashSet;

use serde::Serialize;
use tabclean_model::{Category, ColumnValues, format_numeric};

use crate::executor::NormalizedColumn;

/// Quality metrics for one normalized column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnQuality {
    pub column: String,
    pub category: Category,
    pub rows: usize,
    pub non_missing: usize,
    pub missing: usize,
    /// `missing / rows`; 0.0 for an empty column.
    pub missing_ratio: f64,
    pub parse_failures: usize,
    /// Zero-based rows that failed to convert, capped at
    /// [`crate::executor::INVALID_ROW_LIMIT`].
    pub invalid_rows: Vec<usize>,
    /// Distinct non-missing values.
    pub unique: usize,
    pub min: Option<String>,
    pub max: Option<String>,
    /// First non-missing value.
    pub sample: Option<String>,
}

/// Quality metrics for a normalized table, one entry per column in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableReport {
    pub rows: usize,
    pub columns: Vec<ColumnQuality>,
}

impl TableReport {
    pub fn new(rows: usize, columns: Vec<ColumnQuality>) -> Self {
        Self { rows, columns }
    }

    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }

    pub fn total_parse_failures(&self) -> usize {
        self.columns.iter().map(|c| c.parse_failures).sum()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnQuality> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Profile one normalized column.
pub fn profile_column(normalized: &NormalizedColumn) -> ColumnQuality {
    let values = normalized.column.values();
    let rows = values.len();
    let missing = values.missing_count();

    let present: Vec<String> = (0..rows)
        .filter(|&idx| values.cell(idx).is_some_and(|cell| !cell.is_missing()))
        .filter_map(|idx| values.display_value(idx))
        .collect();
    let unique = present.iter().collect::<HashSet<_>>().len();
    let (min, max) = value_range(values);

    ColumnQuality {
        column: normalized.column.name().to_string(),
        category: normalized.category,
        rows,
        non_missing: rows - missing,
        missing,
        missing_ratio: if rows == 0 {
            0.0
        } else {
            missing as f64 / rows as f64
        },
        parse_failures: normalized.stats.parse_failures,
        invalid_rows: normalized.stats.invalid_rows.clone(),
        unique,
        min,
        max,
        sample: present.into_iter().next(),
    }
}

/// Rendered min and max of ordered column types.
fn value_range(values: &ColumnValues) -> (Option<String>, Option<String>) {
    match values {
        ColumnValues::Numeric(v) => {
            let present = v.iter().flatten().copied();
            let min = present.clone().reduce(f64::min);
            let max = present.reduce(f64::max);
            (min.map(format_numeric), max.map(format_numeric))
        }
        ColumnValues::Date(v) => {
            let min = v.iter().flatten().min().map(ToString::to_string);
            let max = v.iter().flatten().max().map(ToString::to_string);
            (min, max)
        }
        ColumnValues::DateTime(v) => {
            let min = v.iter().flatten().min().map(ToString::to_string);
            let max = v.iter().flatten().max().map(ToString::to_string);
            (min, max)
        }
        ColumnValues::Raw(_) | ColumnValues::Text(_) => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ColumnStats, NormalizedColumn};
    use chrono::NaiveDate;
    use tabclean_model::Column;

    fn normalized(name: &str, category: Category, values: ColumnValues, invalid_rows: &[usize]) -> NormalizedColumn {
        let rows = values.len();
        let missing = values.missing_count();
        NormalizedColumn {
            column: Column::new(name, values),
            category,
            stats: ColumnStats {
                rows,
                missing,
                parse_failures: invalid_rows.len(),
                invalid_rows: invalid_rows.to_vec(),
            },
        }
    }

    #[test]
    fn test_numeric_profile() {
        let column = normalized(
            "amt_no",
            Category::Numeric,
            ColumnValues::Numeric(vec![Some(3.0), None, Some(1.5), Some(3.0)]),
            &[1],
        );
        let quality = profile_column(&column);
        assert_eq!(quality.rows, 4);
        assert_eq!(quality.non_missing, 3);
        assert_eq!(quality.missing, 1);
        assert_eq!(quality.missing_ratio, 0.25);
        assert_eq!(quality.parse_failures, 1);
        assert_eq!(quality.invalid_rows, vec![1]);
        assert_eq!(quality.unique, 2);
        assert_eq!(quality.min.as_deref(), Some("1.5"));
        assert_eq!(quality.max.as_deref(), Some("3"));
        assert_eq!(quality.sample.as_deref(), Some("3"));
    }

    #[test]
    fn test_date_profile() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day);
        let column = normalized(
            "reg_ym",
            Category::Date,
            ColumnValues::Date(vec![d(9), None, d(2)]),
            &[],
        );
        let quality = profile_column(&column);
        assert_eq!(quality.min.as_deref(), Some("2025-01-02"));
        assert_eq!(quality.max.as_deref(), Some("2025-01-09"));
        assert_eq!(quality.sample.as_deref(), Some("2025-01-09"));
    }

    #[test]
    fn test_empty_column_ratio() {
        let column = normalized("memo", Category::Text, ColumnValues::Text(Vec::new()), &[]);
        let quality = profile_column(&column);
        assert_eq!(quality.missing_ratio, 0.0);
        assert_eq!(quality.sample, None);
        assert_eq!(quality.min, None);
    }

    #[test]
    fn test_report_totals() {
        let report = TableReport::new(
            2,
            vec![
                profile_column(&normalized(
                    "a_no",
                    Category::Numeric,
                    ColumnValues::Numeric(vec![None, None]),
                    &[0, 1],
                )),
                profile_column(&normalized(
                    "b",
                    Category::Text,
                    ColumnValues::Text(vec![Some("x".to_string()), None]),
                    &[],
                )),
            ],
        );
        assert_eq!(report.total_missing(), 3);
        assert_eq!(report.total_parse_failures(), 2);
        assert_eq!(report.column("b").map(|c| c.unique), Some(1));
        assert!(report.column("c").is_none());
    }
}
