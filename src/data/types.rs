//! Core data types for the sales table
//!
//! - `Row`: one (date, category, value) observation
//! - `Category`: the fixed product category labels
//! - `MetricSnapshot`: headline figures shown on the metric cards

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single sales observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Row {
    /// Calendar day of the sale
    pub date: NaiveDate,
    /// Product category
    pub category: Category,
    /// Sales amount in dollars
    pub value: f64,
}

impl Row {
    pub fn new(date: NaiveDate, category: Category, value: f64) -> Self {
        Self {
            date,
            category,
            value,
        }
    }
}

/// Product category
///
/// Declaration order is the stable display order used for sorting buckets
/// and legends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
}

impl Category {
    /// Get all categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::Electronics,
            Category::Clothing,
            Category::Books,
            Category::Home,
        ]
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Home => "Home",
        }
    }

    /// Chart colour for this category
    pub fn color(&self) -> &'static str {
        match self {
            Category::Electronics => "#667eea",
            Category::Clothing => "#f093fb",
            Category::Books => "#4facfe",
            Category::Home => "#43e97b",
        }
    }

    /// Whether weekend sales get the multiplicative boost
    pub fn has_weekend_boost(&self) -> bool {
        matches!(self, Category::Electronics | Category::Books)
    }

    /// Parse a label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One headline figure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricValue {
    /// Metric name (e.g. "Revenue")
    pub name: String,
    /// Pre-formatted display string (e.g. "$1,234,567")
    pub display: String,
    /// CSS class giving the card its accent
    pub accent: String,
}

impl MetricValue {
    fn new(name: &str, display: &str, accent: &str) -> Self {
        Self {
            name: name.to_string(),
            display: display.to_string(),
            accent: accent.to_string(),
        }
    }
}

/// Headline metrics shown above the charts
///
/// Static for the process lifetime; these are not derived from rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSnapshot {
    metrics: Vec<MetricValue>,
}

impl MetricSnapshot {
    /// The fixed headline set: Revenue, Users, Conversion Rate, Growth
    pub fn headline() -> Self {
        Self {
            metrics: vec![
                MetricValue::new("Revenue", "$1,234,567", "revenue-card"),
                MetricValue::new("Users", "45,678", "users-card"),
                MetricValue::new("Conversion Rate", "3.2%", "conversion-card"),
                MetricValue::new("Growth", "+12.5%", "growth-card"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricValue> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
