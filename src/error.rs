//! Error types for preview-scraper

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Crate-level error for file and configuration plumbing
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for file and configuration plumbing
pub type Result<T> = std::result::Result<T, Error>;

/// API error type
///
/// The trigger handlers only ever fail on file plumbing, so the surface is
/// small: every failure maps to a 500 with a coded JSON envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// File or configuration failure surfaced to the caller
    #[error("Store error: {0}")]
    Store(#[from] Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Store(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                err.to_string(),
            ),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
