//! Response body of `GET /health`.

use serde::Serialize;

/// Overall status (`healthy` or `degraded`) and the crate version.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// The link store is the only dependency checked.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Result of [`crate::application::services::LinkService::ping`].
    pub database: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    /// `ok` or `error`.
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
