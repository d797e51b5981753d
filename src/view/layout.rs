//! Page layout
//!
//! A declarative description of the dashboard page, assembled once from the
//! store at startup. It carries no behaviour; `render` turns it into HTML and
//! the `/dashboard/_layout` route serves it as JSON.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::DataStore;
use crate::filter::{daily_totals, TrendPoint};

/// DOM id of the date range control
pub const DATE_RANGE_ID: &str = "date-picker-range";
/// DOM id of the category multi-select
pub const CATEGORY_ID: &str = "category-dropdown";
/// DOM id of the static trend chart
pub const TREND_CHART_ID: &str = "sales-trend";
/// DOM id of the chart replaced on every update
pub const FILTERED_CHART_ID: &str = "filtered-chart";

/// Whole page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layout {
    pub header: Header,
    pub metric_cards: Vec<MetricCard>,
    pub controls: Controls,
    pub charts: Vec<ChartPanel>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
}

/// One headline figure card
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    /// CSS class for the card colour
    pub accent: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Controls {
    pub date_range: DateRangeControl,
    pub categories: CategoryControl,
}

/// Date range picker seeded with the table's bounds
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateRangeControl {
    pub id: String,
    pub label: String,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display_format: String,
}

/// Category multi-select seeded with every category selected
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryControl {
    pub id: String,
    pub label: String,
    pub options: Vec<CategoryOption>,
    pub selected: Vec<String>,
    pub multi: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryOption {
    pub label: String,
    pub value: String,
    pub color: String,
}

/// A titled chart slot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPanel {
    pub id: String,
    pub title: String,
    pub content: ChartContent,
}

/// What a chart slot holds at build time
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartContent {
    /// Line chart drawn once from the full table
    Line {
        x_title: String,
        y_title: String,
        color: String,
        points: Vec<TrendPoint>,
    },
    /// Filled in by the first update
    Pending,
}

impl Layout {
    /// Assemble the page from the store
    pub fn build(store: &DataStore) -> Self {
        let (min_date, max_date) = store.date_bounds();

        let metric_cards = store
            .metrics()
            .iter()
            .map(|m| MetricCard {
                label: m.name.clone(),
                value: m.display.clone(),
                accent: m.accent.clone(),
            })
            .collect();

        let options: Vec<CategoryOption> = store
            .categories()
            .iter()
            .map(|c| CategoryOption {
                label: c.label().to_string(),
                value: c.label().to_string(),
                color: c.color().to_string(),
            })
            .collect();
        let selected = options.iter().map(|o| o.value.clone()).collect();

        let controls = Controls {
            date_range: DateRangeControl {
                id: DATE_RANGE_ID.to_string(),
                label: "Date Range:".to_string(),
                min_date,
                max_date,
                start_date: min_date,
                end_date: max_date,
                display_format: "YYYY-MM-DD".to_string(),
            },
            categories: CategoryControl {
                id: CATEGORY_ID.to_string(),
                label: "Categories:".to_string(),
                options,
                selected,
                multi: true,
            },
        };

        let charts = vec![
            ChartPanel {
                id: TREND_CHART_ID.to_string(),
                title: "Sales Trend".to_string(),
                content: ChartContent::Line {
                    x_title: "Date".to_string(),
                    y_title: "Total Sales ($)".to_string(),
                    color: "#667eea".to_string(),
                    points: daily_totals(store.rows()),
                },
            },
            ChartPanel {
                id: FILTERED_CHART_ID.to_string(),
                title: "Filtered Sales Data".to_string(),
                content: ChartContent::Pending,
            },
        ];

        Self {
            header: Header {
                title: "Business Dashboard".to_string(),
                subtitle: "Real-time analytics and insights".to_string(),
            },
            metric_cards,
            controls,
            charts,
        }
    }

    /// Find a chart slot by DOM id
    pub fn chart(&self, id: &str) -> Option<&ChartPanel> {
        self.charts.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, GeneratorConfig, Row, DEFAULT_SEED};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_build_from_default_store() {
        let store = DataStore::build(DEFAULT_SEED, &GeneratorConfig::default()).unwrap();
        let layout = Layout::build(&store);

        assert_eq!(layout.header.title, "Business Dashboard");

        let labels: Vec<_> = layout.metric_cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Revenue", "Users", "Conversion Rate", "Growth"]);
        assert_eq!(layout.metric_cards[0].value, "$1,234,567");

        let range = &layout.controls.date_range;
        assert_eq!(range.start_date, date(2024, 1, 1));
        assert_eq!(range.end_date, date(2024, 12, 31));

        let categories = &layout.controls.categories;
        assert!(categories.multi);
        assert_eq!(categories.selected, vec!["Electronics", "Clothing", "Books", "Home"]);

        match &layout.chart(TREND_CHART_ID).unwrap().content {
            ChartContent::Line { points, .. } => assert_eq!(points.len(), 366),
            other => panic!("Expected line chart, got {:?}", other),
        }
        assert_eq!(
            layout.chart(FILTERED_CHART_ID).unwrap().content,
            ChartContent::Pending
        );
    }

    #[test]
    fn test_controls_follow_store_contents() {
        let store = DataStore::from_rows(vec![
            Row::new(date(2024, 5, 1), Category::Home, 10.0),
            Row::new(date(2024, 5, 3), Category::Books, 10.0),
        ])
        .unwrap();
        let layout = Layout::build(&store);

        assert_eq!(layout.controls.categories.selected, vec!["Books", "Home"]);
        assert_eq!(layout.controls.date_range.min_date, date(2024, 5, 1));
        assert_eq!(layout.controls.date_range.max_date, date(2024, 5, 3));
    }

    #[test]
    fn test_layout_serializes() {
        let store = DataStore::from_rows(vec![Row::new(date(2024, 5, 1), Category::Home, 10.0)])
            .unwrap();
        let json = serde_json::to_value(Layout::build(&store)).unwrap();

        assert_eq!(json["charts"][0]["content"]["kind"], "line");
        assert_eq!(json["charts"][1]["content"]["kind"], "pending");
        assert_eq!(json["controls"]["date_range"]["min_date"], "2024-05-01");
    }
}
