//! Centralized request error handling for snipbin
//!
//! This module provides a unified error type for the pipeline and handlers
//! with HTTP status code mapping. Response bodies carry the generic status
//! text only; internal detail (query text, stack context) is logged server
//! side and never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::DataError;

/// Request error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("CSRF token missing or invalid")]
    CsrfRejected,

    #[error("Session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::CsrfRejected => StatusCode::BAD_REQUEST,
            AppError::Session(_) | AppError::Render(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Server error occurred");
        } else {
            tracing::debug!(error = %self, "Client error occurred");
        }

        // Generic status text only, matching what the status line says.
        let body = status.canonical_reason().unwrap_or("Error").to_string();
        (status, body).into_response()
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NoRecord => AppError::NotFound,
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::CsrfRejected.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_data_error_mapping() {
        assert!(matches!(AppError::from(DataError::NoRecord), AppError::NotFound));
        assert!(matches!(
            AppError::from(DataError::InvalidCredentials),
            AppError::Internal(_)
        ));
    }
}
