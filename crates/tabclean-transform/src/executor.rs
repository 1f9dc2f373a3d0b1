//! Column and table normalization.
//!
//! [`Normalizer`] owns validated options and applies the per-cell functions of
//! [`crate::normalization`] to whole columns. Two execution strategies exist:
//!
//! - [`ExecutionHint::RowWise`] converts every cell independently.
//! - [`ExecutionHint::Batch`] converts each distinct raw text once per column,
//!   copies columns that already hold the target representation, and spreads
//!   the columns of a table over the rayon pool.
//!
//! Both strategies produce identical columns.

use std::collections::HashMap;

use chrono::{NaiveDateTime, NaiveTime};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tabclean_model::{
    Category, Cell, CellOutcome, Column, ColumnValues, DateOutput, ExecutionHint,
    NormalizationOptions, NormalizeError, Result, Table,
};

use crate::inference::ColumnClassifier;
use crate::normalization::{DateParser, normalize_numeric_cell, normalize_text_cell};
use crate::quality::{TableReport, profile_column};

/// Most failing row indices kept per column.
pub const INVALID_ROW_LIMIT: usize = 100;

/// Per-column conversion counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnStats {
    pub rows: usize,
    /// Missing markers in the output (absent input plus parse failures).
    pub missing: usize,
    /// Present cells that could not be converted.
    pub parse_failures: usize,
    /// Zero-based rows of the first [`INVALID_ROW_LIMIT`] parse failures.
    pub invalid_rows: Vec<usize>,
}

/// A normalized column with the category it was normalized to.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedColumn {
    pub column: Column,
    pub category: Category,
    pub stats: ColumnStats,
}

/// Result of normalizing a whole table.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub table: Table,
    pub report: TableReport,
}

/// Classifies and normalizes columns with one immutable configuration.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizationOptions,
    classifier: ColumnClassifier,
    dates: DateParser,
}

impl Normalizer {
    /// Validate `options` and build a normalizer.
    ///
    /// Configuration errors surface here, before any column is touched.
    pub fn new(options: NormalizationOptions) -> Result<Self> {
        options.validate()?;
        let dates = DateParser::new(&options.dates)?;
        let classifier = ColumnClassifier::new(options.ruleset.clone());
        Ok(Self {
            options,
            classifier,
            dates,
        })
    }

    pub fn options(&self) -> &NormalizationOptions {
        &self.options
    }

    pub fn classifier(&self) -> &ColumnClassifier {
        &self.classifier
    }

    pub fn date_parser(&self) -> &DateParser {
        &self.dates
    }

    pub fn classify(&self, name: &str) -> Category {
        self.classifier.classify(name)
    }

    /// Normalize one column to `category` using the configured hint.
    ///
    /// The result has the same name and length as the input.
    pub fn normalize(&self, column: &Column, category: Category) -> Column {
        self.normalize_with_hint(column, category, self.options.hint)
            .column
    }

    /// Normalize one column with an explicit execution strategy.
    pub fn normalize_with_hint(
        &self,
        column: &Column,
        category: Category,
        hint: ExecutionHint,
    ) -> NormalizedColumn {
        let values = column.values();
        let (values, failures) = match hint {
            ExecutionHint::Batch => match self.copy_normalized(values, category) {
                Some(copied) => (copied, Failures::default()),
                None => self.convert(values, category, hint),
            },
            ExecutionHint::RowWise => self.convert(values, category, hint),
        };
        let stats = ColumnStats {
            rows: values.len(),
            missing: values.missing_count(),
            parse_failures: failures.count,
            invalid_rows: failures.rows,
        };
        NormalizedColumn {
            column: Column::new(column.name(), values),
            category,
            stats,
        }
    }

    /// Normalize a column that belongs to a table of `expected_rows` rows.
    pub fn normalize_rows(
        &self,
        column: &Column,
        category: Category,
        expected_rows: usize,
    ) -> Result<NormalizedColumn> {
        if column.len() != expected_rows {
            return Err(NormalizeError::ShapeMismatch {
                column: column.name().to_string(),
                expected: expected_rows,
                actual: column.len(),
            });
        }
        Ok(self.normalize_with_hint(column, category, self.options.hint))
    }

    /// Classify and normalize every column of a table.
    ///
    /// The shape is checked before any column is processed; column order and
    /// row count are preserved.
    pub fn normalize_table(&self, table: Table) -> Result<NormalizedTable> {
        let span = tracing::info_span!(
            "normalize_table",
            rows = table.height(),
            columns = table.width()
        );
        let _guard = span.enter();

        table.validate()?;
        let rows = table.height();

        let plan: Vec<(Column, Category)> = table
            .into_columns()
            .into_iter()
            .map(|column| {
                let category = self.classify(column.name());
                (column, category)
            })
            .collect();

        let hint = self.options.hint;
        let normalized: Vec<NormalizedColumn> = match hint {
            ExecutionHint::Batch => plan
                .par_iter()
                .map(|(column, category)| self.normalize_with_hint(column, *category, hint))
                .collect(),
            ExecutionHint::RowWise => plan
                .iter()
                .map(|(column, category)| self.normalize_with_hint(column, *category, hint))
                .collect(),
        };

        let mut qualities = Vec::with_capacity(normalized.len());
        let mut columns = Vec::with_capacity(normalized.len());
        for item in normalized {
            log_column(&item);
            qualities.push(profile_column(&item));
            columns.push(item.column);
        }

        let table = Table::new(columns)?;
        let report = TableReport::new(rows, qualities);
        tracing::info!(
            rows,
            columns = table.width(),
            missing = report.total_missing(),
            parse_failures = report.total_parse_failures(),
            "Normalized table"
        );
        Ok(NormalizedTable { table, report })
    }

    fn convert(
        &self,
        values: &ColumnValues,
        category: Category,
        hint: ExecutionHint,
    ) -> (ColumnValues, Failures) {
        let bad = &self.options.bad_values;
        match category {
            Category::Numeric => {
                let (out, failures) =
                    convert_cells(values, hint, |cell| normalize_numeric_cell(cell, bad));
                (ColumnValues::Numeric(out), failures)
            }
            Category::Text => {
                let (out, failures) =
                    convert_cells(values, hint, |cell| normalize_text_cell(cell, bad));
                (ColumnValues::Text(out), failures)
            }
            Category::Date => {
                let (out, failures) =
                    convert_cells(values, hint, |cell| self.dates.normalize_cell(cell, bad));
                (date_values(out, self.dates.output()), failures)
            }
        }
    }

    /// Columns already in the exact target representation are copied.
    fn copy_normalized(&self, values: &ColumnValues, category: Category) -> Option<ColumnValues> {
        match (category, values, self.dates.output()) {
            (Category::Numeric, ColumnValues::Numeric(v), _) => Some(ColumnValues::Numeric(
                v.iter()
                    .map(|value| value.filter(|x| !x.is_nan()))
                    .collect(),
            )),
            (Category::Date, ColumnValues::Date(v), DateOutput::Date) => {
                Some(ColumnValues::Date(v.clone()))
            }
            (Category::Date, ColumnValues::DateTime(v), DateOutput::Timestamp) => {
                Some(ColumnValues::DateTime(v.clone()))
            }
            _ => None,
        }
    }
}

/// Parse failures of one column.
#[derive(Debug, Default)]
struct Failures {
    count: usize,
    rows: Vec<usize>,
}

impl Failures {
    fn record(&mut self, row: usize) {
        self.count += 1;
        if self.rows.len() < INVALID_ROW_LIMIT {
            self.rows.push(row);
        }
    }
}

/// Run `convert` over every cell, returning the values and the failures.
fn convert_cells<T, F>(values: &ColumnValues, hint: ExecutionHint, convert: F) -> (Vec<Option<T>>, Failures)
where
    T: Clone,
    F: Fn(&Cell) -> CellOutcome<T>,
{
    let mut failures = Failures::default();
    let mut record = |row: usize, outcome: CellOutcome<T>| {
        if outcome.is_invalid() {
            failures.record(row);
        }
        outcome.value()
    };

    let out = match (hint, values) {
        (ExecutionHint::Batch, ColumnValues::Raw(cells)) => {
            let mut memo: HashMap<&str, CellOutcome<T>> = HashMap::new();
            cells
                .iter()
                .enumerate()
                .map(|(row, cell)| {
                    let outcome = match cell {
                        Cell::Text(raw) => memo
                            .entry(raw.as_str())
                            .or_insert_with(|| convert(cell))
                            .clone(),
                        other => convert(other),
                    };
                    record(row, outcome)
                })
                .collect()
        }
        _ => values
            .cells()
            .enumerate()
            .map(|(row, cell)| record(row, convert(&cell)))
            .collect(),
    };
    (out, failures)
}

fn date_values(parsed: Vec<Option<NaiveDateTime>>, output: DateOutput) -> ColumnValues {
    match output {
        DateOutput::Date => ColumnValues::Date(
            parsed
                .into_iter()
                .map(|value| value.map(|dt| dt.date()))
                .collect(),
        ),
        DateOutput::Midnight => ColumnValues::DateTime(
            parsed
                .into_iter()
                .map(|value| value.map(|dt| dt.date().and_time(NaiveTime::MIN)))
                .collect(),
        ),
        DateOutput::Timestamp => ColumnValues::DateTime(parsed),
    }
}

fn log_column(item: &NormalizedColumn) {
    let stats = &item.stats;
    if stats.parse_failures > 0 {
        tracing::warn!(
            column = item.column.name(),
            category = %item.category,
            rows = stats.rows,
            missing = stats.missing,
            parse_failures = stats.parse_failures,
            "Values could not be converted and were replaced by missing markers"
        );
    } else {
        tracing::debug!(
            column = item.column.name(),
            category = %item.category,
            rows = stats.rows,
            missing = stats.missing,
            "Normalized column"
        );
    }
}
