//! Thousands-separator removal for exported spreadsheets.
//!
//! Spreadsheet exports often render numbers as `1,234,567`. The normalization
//! core parses numbers strictly, so separators are removed here, before the
//! table reaches it.

use std::borrow::Cow;

use polars::prelude::{Column, DataFrame, DataType, PolarsResult};

/// Remove thousands separators from a comma-grouped number.
///
/// Accepts an optional sign, a leading group of one to three digits followed
/// by groups of exactly three digits, and an optional decimal part
/// (`"-1,234.50"` → `"-1234.50"`). Anything else is returned unchanged,
/// including values that were already stripped.
pub fn strip_thousands_separators(value: &str) -> Cow<'_, str> {
    let trimmed = value.trim();
    if !trimmed.contains(',') {
        return Cow::Borrowed(value);
    }

    let (sign, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-' | b'+') => trimmed.split_at(1),
        _ => ("", trimmed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Cow::Borrowed(value);
        }
    }
    if !is_grouped(integer) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(trimmed.len());
    out.push_str(sign);
    out.extend(integer.chars().filter(|&c| c != ','));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    Cow::Owned(out)
}

fn is_grouped(integer: &str) -> bool {
    let mut groups = integer.split(',');
    let first_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));
    first_ok && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Apply [`strip_thousands_separators`] to every string column of a frame.
///
/// Columns of other types are kept as they are.
pub fn strip_thousands_in_frame(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut stripped = 0usize;
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            columns.push(column.clone());
            continue;
        }
        let values: Vec<Option<String>> = column
            .str()?
            .into_iter()
            .map(|value| {
                value.map(|s| match strip_thousands_separators(s) {
                    Cow::Borrowed(unchanged) => unchanged.to_string(),
                    Cow::Owned(cleaned) => {
                        stripped += 1;
                        cleaned
                    }
                })
            })
            .collect();
        columns.push(Column::new(column.name().clone(), values));
    }
    tracing::debug!(values = stripped, "Removed thousands separators");
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_numbers() {
        assert_eq!(strip_thousands_separators("1,234,567"), "1234567");
        assert_eq!(strip_thousands_separators(" 12,345 "), "12345");
        assert_eq!(strip_thousands_separators("-1,234.50"), "-1234.50");
        assert_eq!(strip_thousands_separators("+999,000"), "+999000");
    }

    #[test]
    fn test_other_values_unchanged() {
        for value in ["1234567", "1,23", "12,3456", ",123", "1,234.", "a,bcd", "1,234,x", "x, y", ""] {
            assert_eq!(strip_thousands_separators(value), value, "{value:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let once = strip_thousands_separators("7,654,321").into_owned();
        assert_eq!(strip_thousands_separators(&once), once);
    }

    #[test]
    fn test_frame_only_touches_strings() {
        let df = DataFrame::new(vec![
            Column::new("pay_amt".into(), vec![Some("1,500"), None, Some("*")]),
            Column::new("seq".into(), vec![1i64, 2, 3]),
        ])
        .unwrap();
        let out = strip_thousands_in_frame(&df).unwrap();
        let amounts: Vec<Option<&str>> = out.column("pay_amt").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(amounts, vec![Some("1500"), None, Some("*")]);
        assert_eq!(out.column("seq").unwrap().dtype(), &DataType::Int64);
    }
}
