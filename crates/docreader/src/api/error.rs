//! Mapping of pipeline errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::DocReaderError;

use super::types::ErrorResponse;

/// Detail sent for every server-side failure. Internals are logged, never returned.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Error returned by the API handlers, rendered as `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: INTERNAL_ERROR_DETAIL.to_string(),
        }
    }
}

impl From<DocReaderError> for ApiError {
    fn from(err: DocReaderError) -> Self {
        match err {
            DocReaderError::UnsupportedFormat(ext) => ApiError::bad_request(format!("Unsupported file type: {}", ext)),
            DocReaderError::Validation { message, .. } => ApiError::bad_request(message),
            other => {
                tracing::error!(error = %other, "Request failed");
                ApiError::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}
