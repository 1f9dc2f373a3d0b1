//! Semantic column categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// The intended semantic type of a column, inferred from its name.
///
/// Deserialization goes through [`FromStr`], so config files accept the same
/// names as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Numeric,
    Date,
    Text,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Numeric, Category::Date, Category::Text];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Numeric => "numeric",
            Category::Date => "date",
            Category::Text => "text",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = NormalizeError;

    /// Parses a category name case-insensitively.
    ///
    /// `string` is accepted as an alias for `text`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Category::Numeric),
            "date" => Ok(Category::Date),
            "text" | "string" => Ok(Category::Text),
            _ => Err(NormalizeError::UnknownCategory(value.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = NormalizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("Numeric".parse::<Category>(), Ok(Category::Numeric));
        assert_eq!(" date ".parse::<Category>(), Ok(Category::Date));
        assert_eq!("string".parse::<Category>(), Ok(Category::Text));
    }

    #[test]
    fn test_unknown_category_fails() {
        assert_eq!(
            "boolean".parse::<Category>(),
            Err(NormalizeError::UnknownCategory("boolean".to_string()))
        );
    }

    #[test]
    fn test_deserialize_matches_from_str() {
        let parsed: Vec<Category> = serde_json::from_str(r#"["numeric", "Date", "string"]"#).unwrap();
        assert_eq!(parsed, vec![Category::Numeric, Category::Date, Category::Text]);

        let err = serde_json::from_str::<Category>(r#""boolean""#).unwrap_err();
        assert!(err.to_string().contains("unknown column category 'boolean'"));
        assert_eq!(serde_json::to_string(&Category::Text).unwrap(), r#""text""#);
    }

    #[test]
    fn test_display_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }
}
