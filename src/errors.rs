use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Only upload-related failures (`Precondition`, `Validation`) can
/// abort a consolidation; per-project fetch failures are contained
/// inside the fetcher and never reach this type.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Missing client selection, unknown client id, or missing upload.
    /// Raised before any parsing or network activity.
    Precondition(String),
    /// Uploaded file unparsable or missing required columns.
    Validation(String),
    /// Error interacting with an external API (client construction).
    ExternalApi(String),
    /// Internal server error. Detail is logged, not exposed.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Precondition(msg) => write!(f, "Precondition failed: {}", msg),
            AppError::Validation(msg) => write!(f, "Invalid upload: {}", msg),
            AppError::ExternalApi(msg) => write!(f, "External API error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Client-correctable failures carry their cause in the body;
    /// internal detail is logged server-side only.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Precondition(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(msg) => {
                tracing::warn!("Upload validation failed: {}", msg);
                (StatusCode::BAD_REQUEST, format!("Invalid upload: {}", msg))
            }
            AppError::ExternalApi(msg) => {
                tracing::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "External service error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApi(err.to_string())
    }
}
