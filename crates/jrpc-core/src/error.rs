//! Error types for JRPC Core

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while decoding a response body
#[derive(Debug, Error)]
pub enum JrpcError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
