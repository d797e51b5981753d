//! Filter & Aggregate
//!
//! Turns the current control values into a chart payload:
//!
//! - **control**: raw `ControlInput` → resolved `ControlState`, date coercion
//! - **aggregate**: `filter()`, weekly `Bucket`s, `ChartPayload`, daily trend
//! - **error**: input validation errors
//!
//! # Example
//!
//! ```rust
//! use salesdash::data::{DataStore, GeneratorConfig, DEFAULT_SEED};
//! use salesdash::filter::{apply, ControlInput};
//!
//! let store = DataStore::build(DEFAULT_SEED, &GeneratorConfig::default()).unwrap();
//! let state = ControlInput::new("2024-01-01", "2024-01-31", &["Electronics"])
//!     .resolve(&store)
//!     .unwrap();
//! let payload = apply(store.rows(), &state);
//! assert!(!payload.is_empty());
//! ```

mod aggregate;
mod control;
mod error;

pub use aggregate::{
    apply, daily_totals, filter, Bucket, ChartPayload, TrendPoint, WeekKey, EMPTY_MESSAGE,
};
pub use control::{coerce_date, ControlInput, ControlState};
pub use error::{FilterError, FilterResult};
