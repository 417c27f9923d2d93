//! JRPC Core Types
//!
//! This module contains the type definitions for the JRPC request/response
//! protocol: the outgoing call envelope and the two mutually exclusive
//! response shapes.

use std::fmt::{Display, Formatter};
use std::sync::{LazyLock, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::{Generator, Ulid};

/// Reserved error code for internally synthesized errors that are not
/// derived from an HTTP status code.
pub const UNEXPECTED_ERROR_CODE: i64 = -1;

/// Process-wide monotonic ULID generator.
///
/// Two identifiers generated back to back within the same millisecond must
/// still sort in issuance order, which plain `Ulid::new()` does not
/// guarantee.
static ULID_GENERATOR: LazyLock<Mutex<Generator>> =
    LazyLock::new(|| Mutex::new(Generator::new()));

/// Correlation identifier linking a request to its response
///
/// Either a caller-supplied token (string or integer) or a generated ULID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl RequestId {
    /// Generate a fresh identifier: globally unique, time-ordered and
    /// lexicographically sortable.
    pub fn generate() -> Self {
        let ulid = match ULID_GENERATOR.lock() {
            Ok(mut generator) => generator.generate().unwrap_or_else(|_| Ulid::new()),
            Err(_) => Ulid::new(),
        };
        RequestId::String(ulid.to_string())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

/// Outgoing call envelope
///
/// One envelope is created per invocation and discarded once the matching
/// response is produced; there are no mutators and no cross-call state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub id: RequestId,
    pub method: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Create an envelope with a generated identifier
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self::with_id(RequestId::generate(), method, params)
    }

    /// Create an envelope with a caller-supplied identifier
    pub fn with_id(id: impl Into<RequestId>, method: impl Into<String>, params: Value) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// Structured error carried by the error-shaped response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            stack: None,
        }
    }

    pub fn with_stack(code: i64, message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            stack: Some(stack.into()),
        }
    }

    /// Synthesized error with the reserved sentinel code
    pub fn unexpected(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self::with_stack(UNEXPECTED_ERROR_CODE, message, stack)
    }
}

impl Display for JsonRpcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error {}: {}", self.code, self.message)
    }
}

/// Normalized response: exactly one of result or error
///
/// Serializes untagged to the wire shapes `{id, result}` / `{id, error}`.
/// `Deserialize` is intentionally not derived: an untagged decode would
/// silently accept a payload carrying both fields. Decoding goes through
/// [`crate::validation::classify_response`], which enforces mutual
/// exclusivity.
///
/// Payload values are never mutated by this crate; ownership moves to the
/// caller together with the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonRpcResponse {
    Result { id: RequestId, result: Value },
    Error { id: RequestId, error: JsonRpcError },
}

impl JsonRpcResponse {
    /// Result-shaped response
    pub fn result(id: impl Into<RequestId>, result: Value) -> Self {
        JsonRpcResponse::Result {
            id: id.into(),
            result,
        }
    }

    /// Error-shaped response
    pub fn error(id: impl Into<RequestId>, error: JsonRpcError) -> Self {
        JsonRpcResponse::Error {
            id: id.into(),
            error,
        }
    }

    /// Correlation identifier, present in both shapes
    pub fn id(&self) -> &RequestId {
        match self {
            JsonRpcResponse::Result { id, .. } => id,
            JsonRpcResponse::Error { id, .. } => id,
        }
    }

    pub fn is_result(&self) -> bool {
        matches!(self, JsonRpcResponse::Result { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, JsonRpcResponse::Error { .. })
    }

    /// Unwrap into `Result`, moving the payload out
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match self {
            JsonRpcResponse::Result { result, .. } => Ok(result),
            JsonRpcResponse::Error { error, .. } => Err(error),
        }
    }
}
