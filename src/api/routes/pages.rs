//! Page Routes
//!
//! - GET / - Landing page
//! - GET /dashboard/ - Dashboard page
//! - GET /dashboard/_layout - Page layout as JSON

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::view::{render_landing, Layout};

/// GET /
pub async fn landing(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_landing(&state.config.dashboard_path))
}

/// GET /dashboard/
///
/// Serves the page rendered at startup.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

/// GET /dashboard/_layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<Layout> {
    Json(state.layout.as_ref().clone())
}
