//! DTOs for link creation and lookup by masked URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use url::Url;
use validator::{Validate, ValidationError};

use crate::domain::entities::Link;

/// Request body for `POST /links`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The original URL to mask (HTTP or HTTPS).
    #[validate(length(min = 1, max = 2048))]
    #[validate(custom(function = "validate_http_url"))]
    pub url: String,

    /// Optional password gating redirects. Empty means none.
    #[validate(length(max = 128))]
    pub password: Option<String>,

    /// Stored with the link; redirects do not enforce it.
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Query for endpoints addressing a link by its masked URL.
///
/// `GET /links/redirect?link=...&password=...` and `PUT /links/invalidate?link=...`.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkQuery {
    #[validate(length(min = 1, max = 2048))]
    pub link: String,

    #[validate(length(max = 128))]
    pub password: Option<String>,
}

/// Public projection of a link. Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub link: String,
    pub target: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            link: link.link,
            target: link.target,
            valid: link.is_valid,
            expiration_date: link.expiration_date,
        }
    }
}

/// Accepts absolute `http`/`https` URLs with a host.
///
/// Rejects schemes such as `javascript:`, `data:` or `file:`.
fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(value).map_err(|_| {
        ValidationError::new("url").with_message(Cow::Borrowed("Invalid URL format"))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::new("url_scheme")
            .with_message(Cow::Borrowed("Only HTTP and HTTPS URLs are allowed")));
    }

    Ok(())
}
