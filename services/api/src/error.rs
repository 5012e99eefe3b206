//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, including the
//! translation of port errors into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::config::ConfigError;
use research_chat_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    /// The status code and client-facing message for this error.
    ///
    /// Port errors keep their own message; everything else collapses to a
    /// generic line so internals never leak to the client.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Port(e) => {
                let status = match e {
                    PortError::Validation(_) | PortError::DuplicateUser => StatusCode::BAD_REQUEST,
                    PortError::InvalidCredentials | PortError::Unauthenticated => {
                        StatusCode::UNAUTHORIZED
                    }
                    PortError::NotFound(_) => StatusCode::NOT_FOUND,
                    PortError::Upstream(_) => StatusCode::BAD_GATEWAY,
                    PortError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let message = match e {
                    PortError::Unexpected(_) => "Internal server error".to_string(),
                    PortError::Upstream(_) => "AI service unavailable".to_string(),
                    _ => e.to_string(),
                };
                (status, message)
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_errors_map_to_their_contract_status_codes() {
        let cases = [
            (
                PortError::Validation("email is required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (PortError::DuplicateUser, StatusCode::BAD_REQUEST),
            (PortError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (PortError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                PortError::NotFound("session".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                PortError::Upstream("timed out".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PortError::Unexpected("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (port_error, expected) in cases {
            let (status, _) = ApiError::Port(port_error).status_and_message();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn upstream_details_never_reach_the_client() {
        let err = ApiError::Port(PortError::Upstream(
            "connect error: 10.0.0.5:8000 refused".to_string(),
        ));
        let (_, message) = err.status_and_message();
        assert_eq!(message, "AI service unavailable");
    }
}
