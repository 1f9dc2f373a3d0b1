//! Data model for type-directed column normalization.
//!
//! - **cell**: tagged raw values and per-cell conversion outcomes
//! - **category**: the numeric/date/text column categories
//! - **table**: columns, typed column values and tables
//! - **options**: classifier ruleset, bad-value set and date parse options
//! - **error**: fatal configuration and shape errors

pub mod category;
pub mod cell;
pub mod error;
pub mod options;
pub mod table;

pub use category::Category;
pub use cell::{Cell, CellOutcome, DATE_FORMAT, DATETIME_FORMAT, format_numeric};
pub use error::{NormalizeError, Result};
pub use options::{
    BadValueSet, DEFAULT_BAD_VALUES, DEFAULT_FALLBACK_FORMATS, DateOutput, DateParseOptions,
    DayOrder, ExecutionHint, KeywordGroup, NormalizationOptions, Ruleset,
};
pub use table::{Column, ColumnValues, Table};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize_round_trip() {
        let options = NormalizationOptions::new()
            .with_day_order(DayOrder::MonthFirst)
            .with_keep_time_of_day(true);
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: NormalizationOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round, options);
    }

    #[test]
    fn partial_options_use_defaults() {
        let json = r#"{ "dates": { "day_order": "month_first" } }"#;
        let options: NormalizationOptions = serde_json::from_str(json).expect("deserialize");
        assert_eq!(options.dates.day_order, DayOrder::MonthFirst);
        assert_eq!(options.dates.fallback_formats.len(), 3);
        assert_eq!(options.ruleset, Ruleset::default());
        assert!(options.bad_values.contains("none"));
    }

    #[test]
    fn malformed_ruleset_rejected_on_load() {
        let json = r#"{ "ruleset": [ { "category": "numeric", "keywords": [""] } ] }"#;
        let result: std::result::Result<NormalizationOptions, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
