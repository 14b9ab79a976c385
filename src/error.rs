//! Application error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error kinds
///
/// Each kind maps to exactly one HTTP status code; callers branch on the
/// kind and never on anything finer.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be decoded
    #[error("failed to decode request body: {0}")]
    Decoding(String),

    /// The request body decoded but is semantically invalid
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// The storage backend failed
    #[error("storage operation failed: {0}")]
    Storage(String),

    /// Configuration loading or validation failed
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// JSON body returned with every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// HTTP status code for this error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Decoding(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed to the client
    ///
    /// Decode and storage internals stay in the logs; clients only see the
    /// kind-level message.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Decoding(_) => "failed to decode request body".to_string(),
            AppError::Validation(message) => message.clone(),
            AppError::NotFound(message) => message.clone(),
            AppError::Storage(_) => "storage operation failed".to_string(),
            AppError::Config(_) => "invalid configuration".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.client_message(),
        });
        (self.status_code(), body).into_response()
    }
}
