//! DTO for the redirect endpoint.

use serde::Serialize;

/// Resolved target of a masked link.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub target: String,
}
