//! Control values
//!
//! `ControlInput` is what arrives from the page (textual dates, label list,
//! any of them possibly missing). `ControlState` is the resolved form the
//! filter works on.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};
use crate::data::{Category, DataStore};

/// Raw control values as sent by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControlInput {
    /// Start of the date range, textual
    #[serde(default)]
    pub start_date: Option<String>,
    /// End of the date range, textual
    #[serde(default)]
    pub end_date: Option<String>,
    /// Selected category labels
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl ControlInput {
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        categories: &[&str],
    ) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            categories: Some(categories.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// Resolve against the store
    ///
    /// Missing dates fall back to the store's bounds and a missing or empty
    /// category list widens to every category in the store. Dates that
    /// cannot be coerced and labels the store does not know are rejected.
    pub fn resolve(&self, store: &DataStore) -> FilterResult<ControlState> {
        let (min_date, max_date) = store.date_bounds();

        let start_date = match non_blank(&self.start_date) {
            Some(s) => coerce_date("start_date", s)?,
            None => min_date,
        };
        let end_date = match non_blank(&self.end_date) {
            Some(s) => coerce_date("end_date", s)?,
            None => max_date,
        };

        let mut categories = Vec::new();
        for label in self.categories.iter().flatten() {
            let category = Category::from_label(label)
                .filter(|c| store.has_category(*c))
                .ok_or_else(|| FilterError::UnknownCategory(label.clone()))?;
            categories.push(category);
        }

        if categories.is_empty() {
            categories = store.categories().to_vec();
        }

        Ok(ControlState::new(start_date, end_date, categories))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolved control values
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ControlState {
    /// Inclusive lower bound
    pub start_date: NaiveDate,
    /// Inclusive upper bound
    pub end_date: NaiveDate,
    /// Selected categories, sorted and without duplicates
    pub categories: Vec<Category>,
}

impl ControlState {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, mut categories: Vec<Category>) -> Self {
        categories.sort();
        categories.dedup();
        Self {
            start_date,
            end_date,
            categories,
        }
    }

    /// Full date range and every category
    pub fn full(store: &DataStore) -> Self {
        let (start_date, end_date) = store.date_bounds();
        Self::new(start_date, end_date, store.categories().to_vec())
    }

    /// Whether the range is reversed (start after end)
    pub fn is_reversed(&self) -> bool {
        self.start_date > self.end_date
    }
}

/// Coerce a textual date bound into a calendar date
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// `YYYY-MM-DD HH:MM:SS[.fff]` and RFC 3339. Time of day is dropped.
pub fn coerce_date(field: &'static str, value: &str) -> FilterResult<NaiveDate> {
    let s = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(FilterError::MalformedDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_store() -> DataStore {
        DataStore::from_rows(vec![
            Row::new(date(2024, 1, 1), Category::Electronics, 100.0),
            Row::new(date(2024, 1, 1), Category::Clothing, 50.0),
            Row::new(date(2024, 1, 8), Category::Electronics, 200.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_coerce_date_formats() {
        let expected = date(2024, 3, 15);
        assert_eq!(coerce_date("start_date", "2024-03-15").unwrap(), expected);
        assert_eq!(coerce_date("start_date", "2024-03-15T00:00:00").unwrap(), expected);
        assert_eq!(coerce_date("start_date", "2024-03-15T13:45:10.250").unwrap(), expected);
        assert_eq!(coerce_date("start_date", "2024-03-15 08:30:00").unwrap(), expected);
        assert_eq!(coerce_date("start_date", "2024-03-15T23:00:00+02:00").unwrap(), expected);
        assert_eq!(coerce_date("start_date", " 2024-03-15 ").unwrap(), expected);
    }

    #[test]
    fn test_coerce_date_rejects_garbage() {
        let err = coerce_date("end_date", "next tuesday").unwrap_err();
        assert_eq!(
            err,
            FilterError::MalformedDate {
                field: "end_date",
                value: "next tuesday".to_string()
            }
        );
        assert!(coerce_date("end_date", "2024-02-30").is_err());
        assert!(coerce_date("end_date", "15/03/2024").is_err());
    }

    #[test]
    fn test_resolve_defaults_to_full_range_and_all_categories() {
        let store = sample_store();
        let state = ControlInput::default().resolve(&store).unwrap();

        assert_eq!(state, ControlState::full(&store));
        assert_eq!(state.start_date, date(2024, 1, 1));
        assert_eq!(state.end_date, date(2024, 1, 8));
        assert_eq!(state.categories, vec![Category::Electronics, Category::Clothing]);
    }

    #[test]
    fn test_resolve_blank_and_empty_values() {
        let store = sample_store();
        let input = ControlInput {
            start_date: Some("  ".to_string()),
            end_date: None,
            categories: Some(Vec::new()),
        };
        assert_eq!(input.resolve(&store).unwrap(), ControlState::full(&store));
    }

    #[test]
    fn test_resolve_sorts_and_dedups_categories() {
        let store = sample_store();
        let input = ControlInput::new(
            "2024-01-01",
            "2024-01-31",
            &["clothing", "Electronics", "Clothing"],
        );
        let state = input.resolve(&store).unwrap();
        assert_eq!(state.categories, vec![Category::Electronics, Category::Clothing]);
    }

    #[test]
    fn test_resolve_rejects_unknown_categories() {
        let store = sample_store();

        let input = ControlInput::new("2024-01-01", "2024-01-31", &["Toys"]);
        assert_eq!(
            input.resolve(&store).unwrap_err(),
            FilterError::UnknownCategory("Toys".to_string())
        );

        // A real label that is absent from this store is also rejected
        let input = ControlInput::new("2024-01-01", "2024-01-31", &["Books"]);
        assert!(matches!(
            input.resolve(&store),
            Err(FilterError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_malformed_dates() {
        let store = sample_store();
        let input = ControlInput::new("2024-13-01", "2024-01-31", &[]);
        assert!(matches!(
            input.resolve(&store),
            Err(FilterError::MalformedDate { field: "start_date", .. })
        ));
    }

    #[test]
    fn test_reversed_range_resolves() {
        let store = sample_store();
        let state = ControlInput::new("2024-02-01", "2024-01-01", &[])
            .resolve(&store)
            .unwrap();
        assert!(state.is_reversed());
    }

    #[test]
    fn test_control_input_deserialize() {
        let json = r#"{"start_date": "2024-01-01T00:00:00", "end_date": null, "categories": ["Books"]}"#;
        let input: ControlInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.start_date.as_deref(), Some("2024-01-01T00:00:00"));
        assert_eq!(input.end_date, None);
        assert_eq!(input.categories, Some(vec!["Books".to_string()]));

        let input: ControlInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, ControlInput::default());
    }
}
