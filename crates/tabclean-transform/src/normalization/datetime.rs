//! Date parsing for date-category columns.
//!
//! Values are parsed by a fixed chain of strategies and the first success wins:
//!
//! 1. The permissive general parser (unless disabled): RFC 3339, year-first
//!    layouts, month names, then day/month ambiguous layouts in the configured
//!    [`DayOrder`].
//! 2. The strict fallback formats, in configuration order
//!    (default `%Y%m%d%H%M%S`, `%Y%m%d`, `%Y%m`).
//!
//! The general parser never claims an all-digit string other than a bare
//! four-digit year, so compact layouts such as `202501` always reach the
//! fallback list, where the more specific formats come first.

use chrono::format::{self, ParseErrorKind, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, NaiveTime};
use tabclean_model::{
    BadValueSet, Cell, CellOutcome, DateOutput, DateParseOptions, DayOrder, Result, format_numeric,
};

use super::{PreparedCell, prepare};

/// Unambiguous layouts that start with the year.
const YEAR_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S%.f",
    "%Y.%m.%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y-%m",
    "%Y/%m",
];

/// Layouts with a month name (`%b` also accepts full month names).
const MONTH_NAME_FORMATS: &[&str] = &[
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%d-%b-%Y",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%Y-%b-%d",
];

const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y",
];

const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%m-%d-%Y",
    "%m.%d.%Y %H:%M:%S",
    "%m.%d.%Y %H:%M",
    "%m.%d.%Y",
];

/// Which strategy produced a parsed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStrategy {
    /// The permissive general parser.
    General,
    /// The fallback format at this index of the configured list.
    Fallback(usize),
}

/// A successfully parsed date/time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub value: NaiveDateTime,
    pub strategy: DateStrategy,
}

/// Parse a value with one strict chrono layout.
///
/// The whole value must match. When the layout does not pin a date (`%Y%m`),
/// missing month and day default to the start of their period, so `202501`
/// reads as 2025-01-01 00:00:00. Ordinal (`%Y%j`) and ISO week (`%G%V%u`)
/// layouts resolve the date on their own.
pub fn parse_with_format(value: &str, fmt: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value, StrftimeItems::new(fmt)).ok()?;
    let date = match parsed.to_naive_date() {
        Ok(date) => date,
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            // Setters refuse to overwrite a field that was parsed, so these only fill gaps.
            let _ = parsed.set_month(1);
            let _ = parsed.set_day(1);
            parsed.to_naive_date().ok()?
        }
        Err(_) => return None,
    };
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);
    let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

/// The permissive general parser.
///
/// Ambiguous numeric layouts (`02/03/2025`) are read in `day_order` first and
/// in the other order only when the preferred reading is impossible
/// (`01/15/2024` is 15 January under either order).
pub fn parse_general(value: &str, day_order: DayOrder) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return if trimmed.len() == 4 {
            parse_with_format(trimmed, "%Y")
        } else {
            None
        };
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    let (preferred, other) = match day_order {
        DayOrder::DayFirst => (DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS),
        DayOrder::MonthFirst => (MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS),
    };

    [YEAR_FIRST_FORMATS, MONTH_NAME_FORMATS, preferred, other]
        .into_iter()
        .flatten()
        .find_map(|fmt| parse_with_format(trimmed, fmt))
}

/// The configured date strategy chain.
#[derive(Debug, Clone)]
pub struct DateParser {
    permissive: bool,
    day_order: DayOrder,
    fallback_formats: Vec<String>,
    output: DateOutput,
}

impl DateParser {
    /// Build a parser, failing when no parse path exists or a layout is malformed.
    pub fn new(options: &DateParseOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            permissive: options.permissive,
            day_order: options.day_order,
            fallback_formats: options.fallback_formats.clone(),
            output: options.output,
        })
    }

    pub fn output(&self) -> DateOutput {
        self.output
    }

    pub fn fallback_formats(&self) -> &[String] {
        &self.fallback_formats
    }

    /// Run the strategy chain on a text value.
    pub fn parse(&self, value: &str) -> Option<ParsedDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        if self.permissive {
            if let Some(value) = parse_general(trimmed, self.day_order) {
                return Some(ParsedDate {
                    value,
                    strategy: DateStrategy::General,
                });
            }
        }
        self.fallback_formats
            .iter()
            .enumerate()
            .find_map(|(idx, fmt)| {
                parse_with_format(trimmed, fmt).map(|value| ParsedDate {
                    value,
                    strategy: DateStrategy::Fallback(idx),
                })
            })
    }

    /// Convert one cell of a date column to a timestamp.
    ///
    /// Numeric literals are parsed through their canonical text
    /// (`202501` → `"202501"`); typed dates are kept as they are.
    pub fn normalize_cell(&self, cell: &Cell, bad_values: &BadValueSet) -> CellOutcome<NaiveDateTime> {
        match prepare(cell, bad_values) {
            PreparedCell::Absent => CellOutcome::Absent,
            PreparedCell::Text(text) => self.parse_outcome(text),
            PreparedCell::Int(v) => self.parse_outcome(&v.to_string()),
            PreparedCell::Float(v) => self.parse_outcome(&format_numeric(v)),
            PreparedCell::Date(d) => CellOutcome::Valid(d.and_time(NaiveTime::MIN)),
            PreparedCell::DateTime(dt) => CellOutcome::Valid(dt),
        }
    }

    fn parse_outcome(&self, text: &str) -> CellOutcome<NaiveDateTime> {
        CellOutcome::from_parse(self.parse(text).map(|parsed| parsed.value))
    }
}
