//! # Salesdash
//!
//! A single-page business analytics dashboard: a line chart of daily sales
//! and a weekly bar chart that re-aggregates as the date range and category
//! controls change.
//!
//! ## Modules
//!
//! - [`data`]: Synthetic sales table and the immutable `DataStore`
//! - [`filter`]: Control resolution, filtering and weekly aggregation
//! - [`view`]: Page layout and HTML rendering
//! - [`dispatch`]: The boundary every control change passes through
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: WebSocket update channel
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use salesdash::data::{DataStore, GeneratorConfig, DEFAULT_SEED};
//! use salesdash::dispatch::Dispatcher;
//! use salesdash::filter::ControlInput;
//! use std::sync::Arc;
//!
//! let store = Arc::new(DataStore::build(DEFAULT_SEED, &GeneratorConfig::default()).unwrap());
//! let dispatcher = Dispatcher::new(store);
//!
//! let payload = dispatcher
//!     .handle(&ControlInput::new("2024-01-01", "2024-01-31", &["Electronics"]))
//!     .unwrap();
//!
//! println!("{} weekly buckets", payload.buckets().len());
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod filter;
pub mod view;
pub mod websocket;

// Re-export top-level types for convenience
pub use data::{Category, DataError, DataResult, DataStore, GeneratorConfig, MetricSnapshot, Row};

pub use filter::{
    filter, Bucket, ChartPayload, ControlInput, ControlState, FilterError, FilterResult,
    TrendPoint, EMPTY_MESSAGE,
};

pub use dispatch::Dispatcher;

pub use view::{render_page, Layout};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};

pub use config::{Config, ConfigError, DataConfig, LoggingConfig, ServerConfig};
