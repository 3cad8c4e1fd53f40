//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde_json::json;

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the redirect count of a link.
///
/// # Endpoint
///
/// `GET /links/{id}/stats`
///
/// # Response
///
/// ```json
/// { "count": 42 }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
/// Returns 400 Bad Request if `id` is not an integer.
pub async fn stats_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Path(id) = id.map_err(|e| {
        AppError::bad_request("Invalid link id", json!({ "reason": e.body_text() }))
    })?;

    let link = state.link_service.statistics(id).await?;

    Ok(Json(StatsResponse {
        count: link.redirects_count,
    }))
}
