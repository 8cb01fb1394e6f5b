//! Error types for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors surfaced to browser clients.
///
/// Validation messages are descriptive. Upstream and internal failures carry
/// generic text; details go to the server log instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client input out of range (400)
    #[error("{0}")]
    Validation(String),

    /// Upstream unreachable, timed out or returned non-2xx (500)
    #[error("Service unavailable")]
    ServiceUnavailable,

    /// Upstream transport failure with its message exposed (500)
    #[error("{0}")]
    Upstream(String),

    /// Anything else (500)
    #[error("Internal server error")]
    Internal,
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable | ApiError::Upstream(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
