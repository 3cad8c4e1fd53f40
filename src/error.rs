//! Application error type shared by every layer.
//!
//! Each variant maps to one HTTP status and a stable machine-readable code.
//! Handlers return `Result<_, AppError>` and Axum renders the error through
//! [`IntoResponse`] as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Request payload or parameters failed validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A link for this target already exists.
    #[error("The url already has a masked link")]
    DuplicateTarget { target: String },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The link was invalidated and no longer redirects.
    #[error("Link is invalid")]
    InvalidLink { link: String },

    #[error("Password required")]
    PasswordRequired,

    #[error("Password incorrect")]
    PasswordIncorrect,

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::DuplicateTarget { .. }
            | AppError::InvalidLink { .. }
            | AppError::PasswordRequired
            | AppError::PasswordIncorrect => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code exposed to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::DuplicateTarget { .. } => "duplicate_target",
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidLink { .. } => "link_invalid",
            AppError::PasswordRequired => "password_required",
            AppError::PasswordIncorrect => "password_incorrect",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Internal { details, .. } => details.clone(),
            AppError::DuplicateTarget { target } => json!({ "target": target }),
            AppError::InvalidLink { link } => json!({ "link": link }),
            AppError::PasswordRequired | AppError::PasswordIncorrect => json!({}),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details: serde_json::Map<String, Value> = e
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Validation failed", Value::Object(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::DuplicateTarget {
                target: "https://example.com".to_string()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("Link not found", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidLink {
                link: "x".to_string()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::PasswordRequired.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::PasswordIncorrect.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::internal("boom", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_info_for_duplicate_target() {
        let info = AppError::DuplicateTarget {
            target: "https://example.com".to_string(),
        }
        .to_error_info();

        assert_eq!(info.code, "duplicate_target");
        assert_eq!(info.message, "The url already has a masked link");
        assert_eq!(info.details["target"], "https://example.com");
    }

    #[test]
    fn test_password_errors_have_distinct_codes() {
        assert_eq!(AppError::PasswordRequired.code(), "password_required");
        assert_eq!(AppError::PasswordIncorrect.code(), "password_incorrect");
    }

    #[test]
    fn test_sqlx_error_maps_to_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Database error");
    }
}
