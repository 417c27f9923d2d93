//! Failure taxonomy for the JRPC HTTP transport

use std::backtrace::Backtrace;

use jrpc_core::{JsonRpcError, JsonRpcResponse, RequestId, ValidationError};
use reqwest::StatusCode;
use thiserror::Error;

/// Failures the normalization pipeline can hit before a valid response is
/// produced
///
/// None of these crosses the public call boundary; each is folded into an
/// error-shaped [`JsonRpcResponse`] by [`JsonRpcHttpError::into_response`].
#[derive(Debug, Error)]
pub enum JsonRpcHttpError {
    /// Network failure before any HTTP status was obtained, or a failure
    /// while reading the body
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP status outside the success range
    #[error("HTTP error {status}: {reason}")]
    Http { status: u16, reason: String },

    /// Body is not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Body parsed but violates the response shape
    #[error("Schema error: {0}")]
    Schema(#[from] ValidationError),
}

impl JsonRpcHttpError {
    /// HTTP failure with the canonical reason phrase for the status
    pub fn http(status: StatusCode) -> Self {
        JsonRpcHttpError::Http {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }
    }

    /// Fold the failure into the wire error shape, tagged with the
    /// envelope's identifier
    ///
    /// The identifier always comes from the outgoing envelope, never from
    /// an unvalidated payload. HTTP failures carry the status code as the
    /// error code; every other failure class uses the sentinel code and a
    /// captured trace.
    pub fn into_response(self, id: RequestId) -> JsonRpcResponse {
        let error = match self {
            JsonRpcHttpError::Http { status, reason } => {
                JsonRpcError::new(i64::from(status), reason)
            }
            JsonRpcHttpError::Transport(err) => {
                JsonRpcError::unexpected(err.to_string(), capture_stack())
            }
            JsonRpcHttpError::Parse(err) => {
                JsonRpcError::unexpected(err.to_string(), capture_stack())
            }
            JsonRpcHttpError::Schema(err) => {
                JsonRpcError::unexpected(err.to_string(), capture_stack())
            }
        };
        JsonRpcResponse::error(id, error)
    }
}

fn capture_stack() -> String {
    Backtrace::force_capture().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jrpc_core::UNEXPECTED_ERROR_CODE;

    #[test]
    fn test_http_failure_keeps_status_and_reason() {
        let response = JsonRpcHttpError::http(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(RequestId::from("req-1"));

        match response {
            JsonRpcResponse::Error { id, error } => {
                assert_eq!(id, RequestId::from("req-1"));
                assert_eq!(error.code, 500);
                assert_eq!(error.message, "Internal Server Error");
                assert_eq!(error.stack, None);
            }
            JsonRpcResponse::Result { .. } => panic!("expected error shape"),
        }
    }

    #[test]
    fn test_schema_failure_uses_sentinel_code_and_stack() {
        let response = JsonRpcHttpError::Schema(ValidationError::NeitherResultNorError)
            .into_response(RequestId::from(3));

        match response {
            JsonRpcResponse::Error { id, error } => {
                assert_eq!(id, RequestId::from(3));
                assert_eq!(error.code, UNEXPECTED_ERROR_CODE);
                assert!(error.message.contains("neither"));
                assert!(error.stack.is_some());
            }
            JsonRpcResponse::Result { .. } => panic!("expected error shape"),
        }
    }

    #[test]
    fn test_parse_failure_carries_parser_diagnostic() {
        let err = serde_json::from_str::<serde_json::Value>("{\"id\":").unwrap_err();
        let response = JsonRpcHttpError::from(err).into_response(RequestId::from("req-1"));

        match response {
            JsonRpcResponse::Error { error, .. } => {
                assert_eq!(error.code, UNEXPECTED_ERROR_CODE);
                assert!(!error.message.is_empty());
                assert!(error.stack.is_some());
            }
            JsonRpcResponse::Result { .. } => panic!("expected error shape"),
        }
    }
}
