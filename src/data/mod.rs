//! Sales Data
//!
//! The synthetic sales table behind the dashboard:
//!
//! - **types**: `Row`, `Category`, `MetricSnapshot`
//! - **generator**: seeded, deterministic row generation
//! - **store**: the immutable `DataStore` snapshot shared by all requests
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use salesdash::data::{DataStore, GeneratorConfig, DEFAULT_SEED};
//!
//! let store = DataStore::build(DEFAULT_SEED, &GeneratorConfig::default()).unwrap();
//! assert_eq!(store.categories().len(), 4);
//! ```

pub mod error;
pub mod generator;
pub mod store;
pub mod types;

pub use error::{DataError, DataResult};
pub use generator::{generate, generate_with, GeneratorConfig, DEFAULT_SEED};
pub use store::DataStore;
pub use types::{Category, MetricSnapshot, MetricValue, Row};
