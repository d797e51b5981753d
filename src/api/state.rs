//! Application State
//!
//! Shared state accessible by all handlers.
//! Everything in it is read-only after startup, so handlers share it through
//! `Arc` without locking.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::data::DataStore;
use crate::dispatch::Dispatcher;
use crate::view::{render_page, Layout, PageUrls};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The sales table
    pub store: Arc<DataStore>,
    /// Dispatch boundary for control changes
    pub dispatcher: Dispatcher,
    /// Page structure, built once
    pub layout: Arc<Layout>,
    /// Rendered dashboard page
    pub page: Arc<String>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build the layout and page from the store
    pub fn new(store: Arc<DataStore>, config: ServerConfig) -> Self {
        let layout = Layout::build(&store);
        let urls = page_urls(&config);
        let page = render_page(&layout, &urls);

        tracing::info!(
            bytes = page.len(),
            charts = layout.charts.len(),
            "Built dashboard layout"
        );

        Self {
            dispatcher: Dispatcher::new(Arc::clone(&store)),
            store,
            layout: Arc::new(layout),
            page: Arc::new(page),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Dashboard path without the trailing slash, e.g. "/dashboard"
pub fn dashboard_base(config: &ServerConfig) -> String {
    let trimmed = config.dashboard_path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/dashboard".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn page_urls(config: &ServerConfig) -> PageUrls {
    let base = dashboard_base(config);
    PageUrls {
        update: format!("{}/_update", base),
        websocket: format!("{}/_ws", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_path(path: &str) -> ServerConfig {
        ServerConfig {
            dashboard_path: path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dashboard_base() {
        assert_eq!(dashboard_base(&with_path("/dashboard/")), "/dashboard");
        assert_eq!(dashboard_base(&with_path("/sales")), "/sales");
        assert_eq!(dashboard_base(&with_path("reports/")), "/reports");
        assert_eq!(dashboard_base(&with_path("/")), "/dashboard");
    }

    #[test]
    fn test_page_urls_follow_base() {
        let urls = page_urls(&with_path("/sales/"));
        assert_eq!(urls.update, "/sales/_update");
        assert_eq!(urls.websocket, "/sales/_ws");
    }
}
