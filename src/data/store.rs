//! In-memory sales store
//!
//! Built once at startup and shared read-only (`Arc<DataStore>`) by every
//! request handler. Nothing mutates it after construction.

use chrono::NaiveDate;

use super::error::{DataError, DataResult};
use super::generator::{generate_with, GeneratorConfig};
use super::types::{Category, MetricSnapshot, Row};

/// Immutable snapshot of the sales table and headline metrics
#[derive(Debug, Clone)]
pub struct DataStore {
    rows: Vec<Row>,
    categories: Vec<Category>,
    min_date: NaiveDate,
    max_date: NaiveDate,
    metrics: MetricSnapshot,
}

impl DataStore {
    /// Generate the table from a seed and wrap it in a store
    pub fn build(seed: u64, config: &GeneratorConfig) -> DataResult<Self> {
        let rows = generate_with(seed, config)?;
        let store = Self::from_rows(rows)?;

        tracing::info!(
            seed,
            rows = store.len(),
            start = %store.min_date,
            end = %store.max_date,
            "Generated sales table"
        );

        Ok(store)
    }

    /// Wrap existing rows in a store
    ///
    /// Fails on an empty table since there are no date bounds to seed the
    /// controls with.
    pub fn from_rows(rows: Vec<Row>) -> DataResult<Self> {
        let min_date = rows.iter().map(|r| r.date).min().ok_or(DataError::Empty)?;
        let max_date = rows.iter().map(|r| r.date).max().ok_or(DataError::Empty)?;

        let categories = Category::all()
            .iter()
            .copied()
            .filter(|c| rows.iter().any(|r| r.category == *c))
            .collect();

        Ok(Self {
            rows,
            categories,
            min_date,
            max_date,
            metrics: MetricSnapshot::headline(),
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Categories present in the table, in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Earliest and latest date in the table
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.min_date, self.max_date)
    }

    pub fn metrics(&self) -> &MetricSnapshot {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
