//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storyverse_orchestration::CommandFailure;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `CommandFailure` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub CommandFailure);

impl From<CommandFailure> for ApiError {
    fn from(failure: CommandFailure) -> Self {
        Self(failure)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CommandFailure::EmptyQuery | CommandFailure::InvalidSelection(_) => {
                StatusCode::BAD_REQUEST
            }
            CommandFailure::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            CommandFailure::ExecutionFailed => StatusCode::BAD_GATEWAY,
        };

        let body = ErrorBody {
            error: self.0.code(),
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use storyverse_orchestration::SelectionProblem;

    use super::*;

    fn status_of(failure: CommandFailure) -> StatusCode {
        ApiError(failure).into_response().status()
    }

    #[test]
    fn test_empty_query_maps_to_400() {
        assert_eq!(status_of(CommandFailure::EmptyQuery), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_selection_maps_to_400() {
        assert_eq!(
            status_of(CommandFailure::InvalidSelection(SelectionProblem::NotInCatalog)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_timeout_maps_to_504() {
        assert_eq!(
            status_of(CommandFailure::Timeout {
                budget: Duration::from_secs(15)
            }),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_execution_failed_maps_to_502() {
        assert_eq!(
            status_of(CommandFailure::ExecutionFailed),
            StatusCode::BAD_GATEWAY
        );
    }
}
