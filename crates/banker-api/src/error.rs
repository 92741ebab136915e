//! Error types for the HTTP boundary.
//!
//! [`ApiError`] separates the two failure tiers of a command: a named
//! business-rule rejection becomes `422` with a machine-readable code,
//! while infrastructure failures become `500`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use banker_core::{CommandError, Rejection, ServiceError};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A business rule refused the command.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The game service failed or is not running.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The service answered a read command with the wrong kind of outcome.
    #[error("unexpected outcome for {0}")]
    UnexpectedOutcome(&'static str),
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Rejected(rejection) => Self::Rejected(rejection),
            CommandError::Service(service) => Self::Service(service),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Rejected(rejection) = &self {
            let body = serde_json::json!({
                "rejection": rejection.code(),
                "message": rejection.to_string(),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
        }

        let status = match &self {
            Self::Service(ServiceError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self, status = status.as_u16(), "Request failed");

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
