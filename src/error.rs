//! Unified error types for the item store service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Process-level errors: configuration and startup failures.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level errors, rendered as JSON responses.
///
/// The only modeled failure is a missing record; malformed bodies are
/// rejected by the JSON extractor before a handler runs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// No item stored under the requested id.
    #[error("Item not found")]
    ItemNotFound,

    /// No user stored under the requested username.
    #[error("User not found")]
    UserNotFound,
}

/// Error body shape: `{"detail": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Human-readable failure description.
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorDetail {
            detail: self.to_string(),
        };

        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_messages_are_fixed() {
        assert_eq!(ApiError::ItemNotFound.to_string(), "Item not found");
        assert_eq!(ApiError::UserNotFound.to_string(), "User not found");
    }

    #[test]
    fn api_error_renders_404() {
        let response = ApiError::ItemNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
