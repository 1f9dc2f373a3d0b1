//! Configuration options for column classification and normalization.
//!
//! All options are immutable once handed to a classifier or normalizer and are
//! safe to share between threads.

use std::collections::BTreeSet;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{NormalizeError, Result};

/// Sentinel strings treated as missing in every category.
pub const DEFAULT_BAD_VALUES: [&str; 6] = ["", "none", "null", "nan", "-", "*"];

/// Strict fallback layouts, most specific first.
pub const DEFAULT_FALLBACK_FORMATS: [&str; 3] = ["%Y%m%d%H%M%S", "%Y%m%d", "%Y%m"];

/// Column-name keywords mapped to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered keyword groups; the first group with a matching keyword wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeywordGroup>", into = "Vec<KeywordGroup>")]
pub struct Ruleset {
    groups: Vec<KeywordGroup>,
}

impl Ruleset {
    /// Create a ruleset, lower-casing keywords.
    ///
    /// Empty groups and empty keywords are rejected: an empty keyword would
    /// match every column name.
    pub fn new(groups: Vec<KeywordGroup>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(groups.len());
        for group in groups {
            if group.keywords.is_empty() {
                return Err(NormalizeError::InvalidRuleset(format!(
                    "keyword group for '{}' has no keywords",
                    group.category
                )));
            }
            let mut keywords = Vec::with_capacity(group.keywords.len());
            for keyword in group.keywords {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(NormalizeError::InvalidRuleset(format!(
                        "empty keyword in group for '{}'",
                        group.category
                    )));
                }
                keywords.push(keyword);
            }
            normalized.push(KeywordGroup {
                category: group.category,
                keywords,
            });
        }
        Ok(Self { groups: normalized })
    }

    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            groups: vec![
                KeywordGroup::new(Category::Date, ["_ym", "_dtc", "_dtm"]),
                KeywordGroup::new(Category::Numeric, ["_no", "_amt", "_rat"]),
            ],
        }
    }
}

impl TryFrom<Vec<KeywordGroup>> for Ruleset {
    type Error = NormalizeError;

    fn try_from(groups: Vec<KeywordGroup>) -> Result<Self> {
        Self::new(groups)
    }
}

impl From<Ruleset> for Vec<KeywordGroup> {
    fn from(ruleset: Ruleset) -> Self {
        ruleset.groups
    }
}

/// Case-insensitive set of sentinel strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct BadValueSet {
    values: BTreeSet<String>,
}

impl BadValueSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            values: values
                .into_iter()
                .map(|value| value.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Whether an already-trimmed value is a sentinel.
    pub fn contains(&self, trimmed: &str) -> bool {
        if self.values.contains(trimmed) {
            return true;
        }
        self.values.contains(&trimmed.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for BadValueSet {
    fn default() -> Self {
        Self::new(DEFAULT_BAD_VALUES)
    }
}

impl From<Vec<String>> for BadValueSet {
    fn from(values: Vec<String>) -> Self {
        Self::new(values)
    }
}

impl From<BadValueSet> for Vec<String> {
    fn from(set: BadValueSet) -> Self {
        set.values.into_iter().collect()
    }
}

/// Resolution of day/month ambiguity in the permissive parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOrder {
    /// `02/03/2025` is 2 March 2025.
    #[default]
    DayFirst,
    /// `02/03/2025` is 3 February 2025.
    MonthFirst,
}

/// Representation of parsed dates in a normalized column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOutput {
    /// Calendar date; time of day discarded.
    #[default]
    Date,
    /// Timestamp truncated to midnight.
    Midnight,
    /// Timestamp with time of day kept.
    Timestamp,
}

/// Options for the date parse strategy chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateParseOptions {
    /// Try the permissive general parser before the fallback formats.
    pub permissive: bool,
    pub day_order: DayOrder,
    /// Strict chrono layouts tried in order after the general parser.
    pub fallback_formats: Vec<String>,
    pub output: DateOutput,
}

impl Default for DateParseOptions {
    fn default() -> Self {
        Self {
            permissive: true,
            day_order: DayOrder::DayFirst,
            fallback_formats: DEFAULT_FALLBACK_FORMATS
                .iter()
                .map(ToString::to_string)
                .collect(),
            output: DateOutput::Date,
        }
    }
}

impl DateParseOptions {
    /// Check that at least one parse path exists and every layout is valid.
    pub fn validate(&self) -> Result<()> {
        if self.fallback_formats.is_empty() && !self.permissive {
            return Err(NormalizeError::EmptyFormatList);
        }
        for format in &self.fallback_formats {
            let malformed = format.trim().is_empty()
                || StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
            if malformed {
                return Err(NormalizeError::InvalidDateFormat {
                    format: format.clone(),
                });
            }
        }
        Ok(())
    }
}

/// How a column is walked during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionHint {
    /// One cell at a time; the reference semantics.
    RowWise,
    /// Whole-column strategy; must reproduce `RowWise` exactly.
    #[default]
    Batch,
}

/// Options for classification and normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    pub ruleset: Ruleset,
    pub bad_values: BadValueSet,
    pub dates: DateParseOptions,
    pub hint: ExecutionHint,
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = ruleset;
        self
    }

    pub fn with_bad_values(mut self, bad_values: BadValueSet) -> Self {
        self.bad_values = bad_values;
        self
    }

    pub fn with_day_order(mut self, day_order: DayOrder) -> Self {
        self.dates.day_order = day_order;
        self
    }

    pub fn with_permissive_dates(mut self, enable: bool) -> Self {
        self.dates.permissive = enable;
        self
    }

    pub fn with_fallback_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates.fallback_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_output(mut self, output: DateOutput) -> Self {
        self.dates.output = output;
        self
    }

    /// Keep time of day (`true`) or truncate to the calendar date (`false`).
    pub fn with_keep_time_of_day(mut self, keep: bool) -> Self {
        self.dates.output = if keep {
            DateOutput::Timestamp
        } else {
            DateOutput::Date
        };
        self
    }

    pub fn with_hint(mut self, hint: ExecutionHint) -> Self {
        self.hint = hint;
        self
    }

    /// Reject configurations that leave no viable parse path.
    ///
    /// The ruleset validates itself on construction.
    pub fn validate(&self) -> Result<()> {
        self.dates.validate()
    }
}
