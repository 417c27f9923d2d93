//! # JRPC HTTP Transport
//!
//! Reqwest-based client for the JRPC request/response protocol.
//!
//! Every call runs one normalization pipeline: identifier assignment,
//! transport round-trip, HTTP status interpretation, body parsing and
//! structural validation. All failure sources come back as the
//! error-shaped response carrying the call's own identifier; nothing is
//! raised past the call boundary.
//!
//! ## Example
//!
//! ```ignore
//! use jrpc_http::JsonRpcClient;
//! use jrpc_core::JsonRpcRequest;
//!
//! let client = JsonRpcClient::new("https://example.com/api");
//! let request = JsonRpcRequest::new("createTodo", serde_json::json!({"title": "milk"}));
//!
//! // Never an Err: failures are encoded in the response itself
//! let response = client.call(request).await;
//! ```

mod client;
mod error;

pub use client::JsonRpcClient;
pub use error::JsonRpcHttpError;
