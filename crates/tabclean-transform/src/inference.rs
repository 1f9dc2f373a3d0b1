//! Column category inference from column names.
//!
//! The category of a column is derived only from its name, using the ordered
//! keyword groups of a [`Ruleset`]. There are no per-table special cases.
//!
//! # Example
//!
//! ```
//! use tabclean_model::Category;
//! use tabclean_transform::ColumnClassifier;
//!
//! let classifier = ColumnClassifier::default();
//! assert_eq!(classifier.classify("ORDER_DTM"), Category::Date);
//! assert_eq!(classifier.classify("pay_amt"), Category::Numeric);
//! assert_eq!(classifier.classify("remark"), Category::Text);
//! ```

use tabclean_model::{Category, Ruleset, Table};

/// Maps column names to categories using a keyword ruleset.
#[derive(Debug, Clone, Default)]
pub struct ColumnClassifier {
    ruleset: Ruleset,
}

impl ColumnClassifier {
    pub fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Infer the category of a column from its name.
    ///
    /// # Algorithm
    ///
    /// 1. Lower-case the name.
    /// 2. Walk the keyword groups in order; the first group with a keyword
    ///    contained in the name decides the category.
    /// 3. No match → [`Category::Text`].
    ///
    /// With the default ruleset date keywords are checked before numeric
    /// keywords, so `amt_dtm_no` is a date column.
    pub fn classify(&self, name: &str) -> Category {
        let lname = name.to_lowercase();
        self.ruleset
            .groups()
            .iter()
            .find(|group| {
                group
                    .keywords
                    .iter()
                    .any(|keyword| lname.contains(keyword.as_str()))
            })
            .map_or(Category::Text, |group| group.category)
    }

    /// Classify every column of a table, preserving column order.
    pub fn classify_table(&self, table: &Table) -> Vec<(String, Category)> {
        table
            .columns()
            .iter()
            .map(|column| (column.name().to_string(), self.classify(column.name())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabclean_model::KeywordGroup;

    #[test]
    fn test_default_keywords() {
        let classifier = ColumnClassifier::default();
        assert_eq!(classifier.classify("col_NO1"), Category::Numeric);
        assert_eq!(classifier.classify("col_no2"), Category::Numeric);
        assert_eq!(classifier.classify("tax_rat"), Category::Numeric);
        assert_eq!(classifier.classify("col_ym1"), Category::Date);
        assert_eq!(classifier.classify("REG_DTC"), Category::Date);
        assert_eq!(classifier.classify("col_str1"), Category::Text);
    }

    #[test]
    fn test_date_wins_tie() {
        let classifier = ColumnClassifier::default();
        assert_eq!(classifier.classify("pay_amt_ym"), Category::Date);
        assert_eq!(classifier.classify("seq_no_dtm"), Category::Date);
    }

    #[test]
    fn test_custom_ruleset_order_is_respected() {
        let ruleset = Ruleset::new(vec![
            KeywordGroup::new(Category::Numeric, ["_cnt"]),
            KeywordGroup::new(Category::Date, ["_day"]),
        ])
        .unwrap();
        let classifier = ColumnClassifier::new(ruleset);
        assert_eq!(classifier.classify("visit_day_cnt"), Category::Numeric);
        assert_eq!(classifier.classify("visit_day"), Category::Date);
        // Default keywords are gone.
        assert_eq!(classifier.classify("col_no1"), Category::Text);
    }

    #[test]
    fn test_empty_name_is_text() {
        assert_eq!(ColumnClassifier::default().classify(""), Category::Text);
    }
}
