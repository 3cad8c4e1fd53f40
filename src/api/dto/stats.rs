//! DTO for link statistics.

use serde::Serialize;

/// Number of successful redirects through a link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub count: i64,
}
