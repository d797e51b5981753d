//! Synthetic sales generator
//!
//! Produces one row per (date, category) pair over a date range. Values
//! follow a normal distribution scaled by a yearly sine seasonality and a
//! weekend boost for some categories, then clamped to a floor.
//!
//! ```text
//! value = max(floor, N(mean, std_dev) * (1 + amplitude * sin(2π * doy / 365)) * boost)
//! ```
//!
//! Output depends only on the seed and the config, so the same inputs always
//! yield identical rows.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use super::error::{DataError, DataResult};
use super::types::{Category, Row};

/// Default seed for the dashboard table
pub const DEFAULT_SEED: u64 = 42;

/// Generator settings
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// First day (inclusive)
    pub start_date: NaiveDate,
    /// Last day (inclusive)
    pub end_date: NaiveDate,
    /// Mean of the daily base value
    pub mean: f64,
    /// Standard deviation of the daily base value
    pub std_dev: f64,
    /// Seasonal amplitude, in [0, 1)
    pub seasonal_amplitude: f64,
    /// Weekend multiplier for boosted categories
    pub weekend_boost: f64,
    /// Minimum value of any row
    pub floor: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            mean: 250.0,
            std_dev: 50.0,
            seasonal_amplitude: 0.3,
            weekend_boost: 1.2,
            floor: 50.0,
        }
    }
}

impl GeneratorConfig {
    /// Check that the settings can produce a valid table
    pub fn validate(&self) -> DataResult<()> {
        if self.end_date < self.start_date {
            return Err(DataError::InvalidConfig(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        if !self.mean.is_finite() {
            return Err(DataError::InvalidConfig("mean must be finite".to_string()));
        }
        self.distribution()?;
        if !(0.0..1.0).contains(&self.seasonal_amplitude) {
            return Err(DataError::InvalidConfig(
                "seasonal_amplitude must be in [0, 1)".to_string(),
            ));
        }
        if !self.weekend_boost.is_finite() || self.weekend_boost <= 0.0 {
            return Err(DataError::InvalidConfig(
                "weekend_boost must be a positive number".to_string(),
            ));
        }
        if !self.floor.is_finite() || self.floor <= 0.0 {
            return Err(DataError::InvalidConfig(
                "floor must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Distribution of the daily base value
    pub fn distribution(&self) -> DataResult<Normal<f64>> {
        Normal::new(self.mean, self.std_dev)
            .map_err(|e| DataError::InvalidConfig(format!("std_dev {}: {}", self.std_dev, e)))
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Generate the table with default settings
pub fn generate(seed: u64) -> Vec<Row> {
    // Defaults always validate
    generate_with(seed, &GeneratorConfig::default()).unwrap_or_default()
}

/// Generate the table with custom settings
pub fn generate_with(seed: u64, config: &GeneratorConfig) -> DataResult<Vec<Row>> {
    config.validate()?;
    let normal = config.distribution()?;
    Ok(generate_rows(seed, config, &normal))
}

fn generate_rows(seed: u64, config: &GeneratorConfig, normal: &Normal<f64>) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(seed);
    let categories = Category::all();
    let mut rows = Vec::with_capacity(config.days().max(0) as usize * categories.len());

    for date in config
        .start_date
        .iter_days()
        .take_while(|d| *d <= config.end_date)
    {
        let seasonal = seasonal_factor(date, config.seasonal_amplitude);
        let weekend = is_weekend(date);

        for &category in categories {
            let boost = if weekend && category.has_weekend_boost() {
                config.weekend_boost
            } else {
                1.0
            };

            let base = normal.sample(&mut rng);
            let value = (base * seasonal * boost).max(config.floor);

            rows.push(Row::new(date, category, value));
        }
    }

    rows
}

/// 1 + amplitude * sin(2π * day_of_year / 365)
fn seasonal_factor(date: NaiveDate, amplitude: f64) -> f64 {
    1.0 + amplitude * (2.0 * PI * date.ordinal() as f64 / 365.0).sin()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
