//! Update Dispatch
//!
//! The boundary between transports (HTTP, WebSocket, CLI) and the filter.
//! Every control change goes through `Dispatcher::handle`, which resolves the
//! raw input against the shared store and returns a fresh payload. No state
//! is kept between calls.

use std::sync::Arc;
use std::time::Instant;

use crate::data::DataStore;
use crate::filter::{apply, ChartPayload, ControlInput, FilterResult};

/// Dispatches control changes to the filter
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<DataStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// Resolve the input and recompute the filtered chart
    pub fn handle(&self, input: &ControlInput) -> FilterResult<ChartPayload> {
        let start = Instant::now();

        let state = match input.resolve(&self.store) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected control input");
                return Err(e);
            }
        };

        if state.is_reversed() {
            tracing::debug!(
                start_date = %state.start_date,
                end_date = %state.end_date,
                "Start date after end date, nothing selected"
            );
        }

        let payload = apply(self.store.rows(), &state);

        tracing::debug!(
            start_date = %state.start_date,
            end_date = %state.end_date,
            categories = ?state.categories,
            buckets = payload.buckets().len(),
            empty = payload.is_empty(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Recomputed filtered chart"
        );

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, GeneratorConfig, DEFAULT_SEED};
    use crate::filter::{FilterError, EMPTY_MESSAGE};

    fn store() -> Arc<DataStore> {
        Arc::new(DataStore::build(DEFAULT_SEED, &GeneratorConfig::default()).unwrap())
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(store())
    }

    #[test]
    fn test_default_input_covers_whole_table() {
        let store = store();
        let payload = Dispatcher::new(Arc::clone(&store))
            .handle(&ControlInput::default())
            .unwrap();

        let expected: f64 = store.rows().iter().map(|r| r.value).sum();
        assert!((payload.total() - expected).abs() < 1e-6 * expected);
    }

    #[test]
    fn test_out_of_range_dates_give_empty_marker() {
        let payload = dispatcher()
            .handle(&ControlInput::new("2025-01-01", "2025-01-31", &["Electronics"]))
            .unwrap();
        assert_eq!(
            payload,
            ChartPayload::Empty {
                message: EMPTY_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_reversed_range_gives_empty_marker() {
        let payload = dispatcher()
            .handle(&ControlInput::new("2024-06-30", "2024-06-01", &[]))
            .unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_category_filter() {
        let payload = dispatcher()
            .handle(&ControlInput::new("2024-01-01", "2024-01-31", &["Books"]))
            .unwrap();
        assert!(payload.buckets().iter().all(|b| b.category == Category::Books));
        // Jan 2024 spans ISO weeks 1 through 5
        assert_eq!(payload.buckets().len(), 5);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let dispatcher = dispatcher();
        let err = dispatcher
            .handle(&ControlInput::new("soon", "2024-01-31", &[]))
            .unwrap_err();
        assert!(matches!(err, FilterError::MalformedDate { field: "start_date", .. }));

        let err = dispatcher
            .handle(&ControlInput::new("2024-01-01", "2024-01-31", &["Garden"]))
            .unwrap_err();
        assert_eq!(err, FilterError::UnknownCategory("Garden".to_string()));
    }
}
