//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/links/*`  - Link API (rate limited)
//! - `GET /health` - Health check (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/links`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::RateLimitSettings;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limits for `/links`; `None` disables rate limiting
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(
    state: AppState,
    rate_limit: Option<&RateLimitSettings>,
) -> Result<NormalizePath<Router>> {
    let mut link_router = api::routes::link_routes();

    if let Some(settings) = rate_limit {
        link_router = link_router.layer(rate_limit::layer(
            settings.replenish_seconds,
            settings.burst,
        )?);
    }

    let router = Router::new()
        .nest("/links", link_router)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
