use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use todo_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{"error": "..."}`
/// JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from the store.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request body that could not be read as the expected JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                err @ CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg),
                CoreError::Persistence(msg) => {
                    tracing::error!(error = %msg, "Persistence error");
                    (StatusCode::INTERNAL_SERVER_ERROR, msg)
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
