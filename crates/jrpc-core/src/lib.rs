//! # JRPC Core
//!
//! Core types and response validation for the JRPC client transport.
//!
//! This crate provides:
//! - Type definitions for call envelopes, responses and errors
//! - Correlation identifier generation
//! - Structural validation of response payloads
//!
//! ## Example
//!
//! ```rust,ignore
//! use jrpc_core::{parse_response, JsonRpcRequest};
//!
//! // Build an envelope with a generated identifier
//! let request = JsonRpcRequest::new("createTodo", serde_json::json!({"title": "milk"}));
//!
//! // Decode a response body
//! let response = parse_response(body)?;
//! ```

pub mod error;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use error::*;
pub use types::*;
pub use validation::*;
