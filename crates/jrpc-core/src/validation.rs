//! JRPC Response Validation
//!
//! This module classifies a parsed response body against the two valid
//! response shapes. A payload is result-shaped when it carries `id` and
//! `result` without `error`, error-shaped when it carries `id` and `error`
//! without `result`; anything else is a schema mismatch.

use serde_json::Value;
use thiserror::Error;

use crate::error::JrpcError;
use crate::types::{JsonRpcError, JsonRpcResponse, RequestId};

/// Errors that can occur while classifying a response payload
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Response is missing the 'id' field")]
    MissingId,

    #[error("Response 'id' must be a string or an integer")]
    InvalidId,

    #[error("Response carries both 'result' and 'error'")]
    BothResultAndError,

    #[error("Response carries neither 'result' nor 'error'")]
    NeitherResultNorError,

    #[error("'error' must be a JSON object")]
    ErrorNotAnObject,

    #[error("'error.code' is missing or not an integer")]
    ErrorCodeNotInteger,

    #[error("'error.message' is missing or not a string")]
    ErrorMessageNotString,

    #[error("'error.data' must be object-typed when present")]
    ErrorDataNotAnObject,

    #[error("'error.stack' must be a string when present")]
    ErrorStackNotString,
}

/// True iff the value is result-shaped: has `id` and `result`, no `error`
pub fn is_result(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => {
            obj.contains_key("id") && obj.contains_key("result") && !obj.contains_key("error")
        }
        None => false,
    }
}

/// True iff the value is error-shaped: has `id` and `error`, no `result`
pub fn is_error(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => {
            obj.contains_key("id") && obj.contains_key("error") && !obj.contains_key("result")
        }
        None => false,
    }
}

/// Classify a parsed payload into a response
///
/// Mutual exclusivity of `result`/`error` is enforced here, inside the
/// decoder: a payload carrying both or neither is rejected, as is an
/// error-shaped payload whose sub-fields are mistyped.
///
/// # Errors
///
/// Returns `ValidationError` describing the first mismatch found.
pub fn classify_response(value: &Value) -> Result<JsonRpcResponse, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let id = obj.get("id").ok_or(ValidationError::MissingId)?;
    let id = classify_id(id)?;

    match (obj.get("result"), obj.get("error")) {
        (Some(_), Some(_)) => Err(ValidationError::BothResultAndError),
        (None, None) => Err(ValidationError::NeitherResultNorError),
        (Some(result), None) => Ok(JsonRpcResponse::Result {
            id,
            result: result.clone(),
        }),
        (None, Some(error)) => Ok(JsonRpcResponse::Error {
            id,
            error: classify_error(error)?,
        }),
    }
}

/// Parse a response body and classify it
///
/// # Errors
///
/// Returns `JrpcError::Json` when the body is not valid JSON and
/// `JrpcError::Validation` when it parses but violates the response shape.
pub fn parse_response(body: &str) -> Result<JsonRpcResponse, JrpcError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(classify_response(&value)?)
}

fn classify_id(value: &Value) -> Result<RequestId, ValidationError> {
    match value {
        Value::String(s) => Ok(RequestId::String(s.clone())),
        Value::Number(n) => n
            .as_i64()
            .map(RequestId::Number)
            .ok_or(ValidationError::InvalidId),
        _ => Err(ValidationError::InvalidId),
    }
}

fn classify_error(value: &Value) -> Result<JsonRpcError, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::ErrorNotAnObject)?;

    let code = obj
        .get("code")
        .and_then(Value::as_i64)
        .ok_or(ValidationError::ErrorCodeNotInteger)?;

    let message = obj
        .get("message")
        .and_then(Value::as_str)
        .ok_or(ValidationError::ErrorMessageNotString)?
        .to_string();

    // Object-typed in the JS sense: objects, arrays and null all qualify
    let data = match obj.get("data") {
        Some(v @ (Value::Object(_) | Value::Array(_) | Value::Null)) => Some(v.clone()),
        Some(_) => return Err(ValidationError::ErrorDataNotAnObject),
        None => None,
    };

    let stack = match obj.get("stack") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ValidationError::ErrorStackNotString),
        None => None,
    };

    Ok(JsonRpcError {
        code,
        message,
        data,
        stack,
    })
}
