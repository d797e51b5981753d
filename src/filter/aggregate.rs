//! Filter and aggregate
//!
//! The reactive core of the dashboard: select rows by date range and
//! category, then sum them into (ISO week, category) buckets.
//!
//! # Pipeline
//!
//! ```text
//! rows → date/category predicate → empty? → Empty marker
//!                                         → bucket by (week, category) → Series
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::control::ControlState;
use crate::data::{Category, Row};

/// Message carried by the empty-marker payload
pub const EMPTY_MESSAGE: &str = "No data available for selected filters";

/// ISO week identifier, ordered by (year, week)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    /// ISO week containing the given date
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Monday of this week
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
    }
}

impl std::fmt::Display for WeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Summed sales for one (week, category) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    /// ISO week label, e.g. "2024-W01"
    pub week: String,
    /// Monday of the week
    pub week_start: NaiveDate,
    pub category: Category,
    pub total: f64,
}

/// Result of one filter invocation
///
/// Never absent: a selection with no rows becomes `Empty`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartPayload {
    /// Weekly totals ready for rendering
    Series { buckets: Vec<Bucket> },
    /// Placeholder shown with axes hidden
    Empty { message: String },
}

impl ChartPayload {
    /// The empty marker with the standard message
    pub fn empty() -> Self {
        ChartPayload::Empty {
            message: EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartPayload::Empty { .. })
    }

    /// Buckets of a series payload; empty slice for the marker
    pub fn buckets(&self) -> &[Bucket] {
        match self {
            ChartPayload::Series { buckets } => buckets,
            ChartPayload::Empty { .. } => &[],
        }
    }

    /// Sum of all bucket totals
    pub fn total(&self) -> f64 {
        self.buckets().iter().map(|b| b.total).sum()
    }
}

/// Filter rows and aggregate them into weekly buckets
///
/// Bounds are inclusive. An empty `selected` means every category. A
/// reversed range matches nothing and yields the empty marker.
pub fn filter(
    rows: &[Row],
    start_date: NaiveDate,
    end_date: NaiveDate,
    selected: &[Category],
) -> ChartPayload {
    if start_date > end_date {
        tracing::debug!(%start_date, %end_date, "Reversed date range selects no rows");
    }

    let matches = |row: &&Row| {
        row.date >= start_date
            && row.date <= end_date
            && (selected.is_empty() || selected.contains(&row.category))
    };

    let mut sums: BTreeMap<(WeekKey, Category), f64> = BTreeMap::new();
    for row in rows.iter().filter(matches) {
        *sums.entry((WeekKey::of(row.date), row.category)).or_default() += row.value;
    }

    if sums.is_empty() {
        return ChartPayload::empty();
    }

    let buckets = sums
        .into_iter()
        .map(|((week, category), total)| Bucket {
            week: week.to_string(),
            week_start: week.start().unwrap_or(start_date),
            category,
            total,
        })
        .collect();

    ChartPayload::Series { buckets }
}

/// Apply a resolved control state
pub fn apply(rows: &[Row], state: &ControlState) -> ChartPayload {
    filter(rows, state.start_date, state.end_date, &state.categories)
}

/// One point of the daily trend line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: f64,
}

/// Total sales per day across all categories, ascending by date
pub fn daily_totals(rows: &[Row]) -> Vec<TrendPoint> {
    let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows {
        *sums.entry(row.date).or_default() += row.value;
    }

    sums.into_iter()
        .map(|(date, total)| TrendPoint { date, total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate, DEFAULT_SEED};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            Row::new(date(2024, 1, 1), Category::Electronics, 100.0),
            Row::new(date(2024, 1, 1), Category::Clothing, 50.0),
            Row::new(date(2024, 1, 8), Category::Electronics, 200.0),
        ]
    }

    fn selected_sum(rows: &[Row], start: NaiveDate, end: NaiveDate, selected: &[Category]) -> f64 {
        rows.iter()
            .filter(|r| r.date >= start && r.date <= end)
            .filter(|r| selected.is_empty() || selected.contains(&r.category))
            .map(|r| r.value)
            .sum()
    }

    #[test]
    fn test_weekly_buckets_for_single_category() {
        let payload = filter(
            &sample_rows(),
            date(2024, 1, 1),
            date(2024, 1, 31),
            &[Category::Electronics],
        );

        assert!(!payload.is_empty());
        assert_eq!(
            payload.buckets(),
            &[
                Bucket {
                    week: "2024-W01".to_string(),
                    week_start: date(2024, 1, 1),
                    category: Category::Electronics,
                    total: 100.0,
                },
                Bucket {
                    week: "2024-W02".to_string(),
                    week_start: date(2024, 1, 8),
                    category: Category::Electronics,
                    total: 200.0,
                },
            ]
        );
    }

    #[test]
    fn test_no_matching_rows_gives_empty_marker() {
        let payload = filter(
            &sample_rows(),
            date(2025, 1, 1),
            date(2025, 1, 31),
            &[Category::Electronics],
        );

        assert_eq!(
            payload,
            ChartPayload::Empty {
                message: "No data available for selected filters".to_string()
            }
        );
        assert!(payload.buckets().is_empty());
    }

    #[test]
    fn test_reversed_range_gives_empty_marker() {
        let payload = filter(&sample_rows(), date(2024, 1, 31), date(2024, 1, 1), &[]);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let payload = filter(&sample_rows(), date(2024, 1, 8), date(2024, 1, 8), &[]);
        assert_eq!(payload.buckets().len(), 1);
        assert_eq!(payload.total(), 200.0);
    }

    #[test]
    fn test_empty_selection_widens_to_all_categories() {
        let rows = generate(DEFAULT_SEED);
        let start = date(2024, 3, 1);
        let end = date(2024, 5, 31);

        let widened = filter(&rows, start, end, &[]);
        let explicit = filter(&rows, start, end, Category::all());
        assert_eq!(widened, explicit);
    }

    #[test]
    fn test_buckets_sorted_by_week_then_category() {
        let rows = generate(DEFAULT_SEED);
        let payload = filter(&rows, date(2024, 1, 1), date(2024, 12, 31), &[]);
        let buckets = payload.buckets();

        // 2024-12-30 and 31 fall in ISO week 2025-W01
        assert_eq!(buckets.len(), 53 * 4);
        assert_eq!(buckets[0].week, "2024-W01");
        assert_eq!(buckets.last().unwrap().week, "2025-W01");

        for pair in buckets.windows(2) {
            let key = |b: &Bucket| (b.week_start, b.category);
            assert!(key(&pair[0]) < key(&pair[1]));
        }
    }

    #[test]
    fn test_week_spanning_year_boundary() {
        let rows = vec![
            Row::new(date(2020, 12, 31), Category::Home, 1.0),
            Row::new(date(2021, 1, 3), Category::Home, 2.0),
        ];
        let payload = filter(&rows, date(2020, 12, 1), date(2021, 1, 31), &[]);
        // Both days belong to ISO week 2020-W53
        assert_eq!(payload.buckets().len(), 1);
        assert_eq!(payload.buckets()[0].week, "2020-W53");
        assert_eq!(payload.buckets()[0].week_start, date(2020, 12, 28));
        assert_eq!(payload.total(), 3.0);
    }

    #[test]
    fn test_totals_are_conserved() {
        let rows = generate(DEFAULT_SEED);
        let cases: [(NaiveDate, NaiveDate, &[Category]); 4] = [
            (date(2024, 1, 1), date(2024, 12, 31), &[]),
            (date(2024, 2, 10), date(2024, 4, 3), &[Category::Books]),
            (date(2024, 6, 1), date(2024, 6, 30), &[Category::Clothing, Category::Home]),
            (date(2023, 12, 1), date(2024, 1, 14), &[Category::Electronics]),
        ];

        for (start, end, selected) in cases {
            let payload = filter(&rows, start, end, selected);
            let expected = selected_sum(&rows, start, end, selected);
            assert!(
                (payload.total() - expected).abs() < 1e-6 * expected.max(1.0),
                "total {} != {} for {}..{}",
                payload.total(),
                expected,
                start,
                end
            );
        }
    }

    #[test]
    fn test_filter_is_idempotent_and_pure() {
        let rows = generate(DEFAULT_SEED);
        let before = rows.clone();

        let first = filter(&rows, date(2024, 4, 1), date(2024, 8, 15), &[Category::Books]);
        let second = filter(&rows, date(2024, 4, 1), date(2024, 8, 15), &[Category::Books]);

        assert_eq!(first, second);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_apply_uses_control_state() {
        let rows = sample_rows();
        let state = ControlState::new(
            date(2024, 1, 1),
            date(2024, 1, 7),
            vec![Category::Clothing],
        );
        let payload = apply(&rows, &state);
        assert_eq!(payload.buckets().len(), 1);
        assert_eq!(payload.buckets()[0].category, Category::Clothing);
        assert_eq!(payload.total(), 50.0);
    }

    #[test]
    fn test_payload_serialization() {
        let json = serde_json::to_value(ChartPayload::empty()).unwrap();
        assert_eq!(json["kind"], "empty");
        assert_eq!(json["message"], EMPTY_MESSAGE);

        let payload = filter(&sample_rows(), date(2024, 1, 1), date(2024, 1, 1), &[]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "series");
        assert_eq!(json["buckets"][0]["week"], "2024-W01");
        assert_eq!(json["buckets"][0]["week_start"], "2024-01-01");
        assert_eq!(json["buckets"][0]["category"], "Electronics");
        assert_eq!(json["buckets"][1]["category"], "Clothing");
    }

    #[test]
    fn test_daily_totals() {
        let trend = daily_totals(&sample_rows());
        assert_eq!(
            trend,
            vec![
                TrendPoint { date: date(2024, 1, 1), total: 150.0 },
                TrendPoint { date: date(2024, 1, 8), total: 200.0 },
            ]
        );

        let full = daily_totals(&generate(DEFAULT_SEED));
        assert_eq!(full.len(), 366);
    }
}
