//! Handlers for link creation and invalidation.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkQuery, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a masked link for a long URL.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "password": "secret",                     // optional
///   "expirationDate": "2030-01-01T00:00:00Z"  // optional, not enforced
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "link": "https://mask.ly/Xb3_k9Qa",
///   "target": "https://example.com/some/long/path",
///   "valid": true
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or the URL already has a
/// masked link.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;
    payload.validate()?;

    let link = state
        .link_service
        .create(payload.url, payload.password, payload.expiration_date)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Invalidates a masked link so it no longer redirects.
///
/// # Endpoint
///
/// `PUT /links/invalidate?link={masked_link}`
///
/// Idempotent: invalidating an already invalid link returns 200 again.
///
/// # Errors
///
/// Returns 404 Not Found if the masked link doesn't exist.
pub async fn invalidate_link_handler(
    State(state): State<AppState>,
    query: Result<Query<LinkQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::bad_request("Invalid query parameters", json!({ "reason": e.body_text() }))
    })?;
    query.validate()?;

    state.link_service.invalidate_link(&query.link).await?;

    Ok(StatusCode::OK)
}
