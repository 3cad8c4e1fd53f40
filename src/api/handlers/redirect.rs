//! Handler for masked link resolution.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::LinkQuery;
use crate::api::dto::redirect::RedirectResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a masked link to its target and counts the redirect.
///
/// # Endpoint
///
/// `GET /links/redirect?link={masked_link}&password={password}`
///
/// The client performs the actual navigation; this endpoint only returns
/// the target.
///
/// # Response
///
/// ```json
/// { "target": "https://example.com/some/long/path" }
/// ```
///
/// # Errors
///
/// - 404 Not Found if the masked link doesn't exist
/// - 400 Bad Request (`link_invalid`) if the link was invalidated
/// - 400 Bad Request (`password_required`) if the link is protected and no
///   password was given
/// - 400 Bad Request (`password_incorrect`) if the password doesn't match
pub async fn redirect_handler(
    State(state): State<AppState>,
    query: Result<Query<LinkQuery>, QueryRejection>,
) -> Result<Json<RedirectResponse>, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::bad_request("Invalid query parameters", json!({ "reason": e.body_text() }))
    })?;
    query.validate()?;

    let link = state
        .link_service
        .redirect(&query.link, query.password)
        .await?;

    Ok(Json(RedirectResponse {
        target: link.target,
    }))
}
