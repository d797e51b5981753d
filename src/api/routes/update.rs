//! Update Route
//!
//! POST /dashboard/_update - Recompute the filtered chart for new control
//! values. Body: `{"start_date": .., "end_date": .., "categories": [..]}`,
//! every field optional.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::UpdateResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::filter::ControlInput;

/// POST /dashboard/_update
pub async fn update_chart(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ControlInput>,
) -> ApiResult<Json<UpdateResponse>> {
    let payload = state.dispatcher.handle(&input)?;

    Ok(Json(UpdateResponse {
        payload,
        request_id: uuid::Uuid::new_v4().to_string(),
    }))
}
