//! API route configuration.

use crate::api::handlers::{
    create_link_handler, invalidate_link_handler, redirect_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Link management routes, nested under `/links` by [`crate::routes::app_router`].
///
/// # Endpoints
///
/// - `POST /`               - Create a masked link
/// - `GET  /redirect`       - Resolve a masked link (`?link=&password=`)
/// - `GET  /{id}/stats`     - Redirect count of a link
/// - `PUT  /invalidate`     - Invalidate a masked link (`?link=`)
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_link_handler))
        .route("/redirect", get(redirect_handler))
        .route("/{id}/stats", get(stats_handler))
        .route("/invalidate", put(invalidate_link_handler))
}
