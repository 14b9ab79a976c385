//! HTTP surface - route table and request handlers

pub mod answers;
pub mod questions;
pub mod routes;

use axum::body::Bytes;
use axum::extract::Request;
use tracing::error;

use crate::error::{AppError, Result};

/// Largest request body the handlers will buffer
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Read the full request body, bounded by [`MAX_BODY_BYTES`]
pub(crate) async fn read_body(request: Request) -> Result<Bytes> {
    axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|error| {
            error!(error = %error, "Failed to read request body");
            AppError::Decoding(format!("failed to read request body: {}", error))
        })
}
