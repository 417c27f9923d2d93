//! Reqwest-based JRPC client

use jrpc_core::{classify_response, JsonRpcRequest, JsonRpcResponse, RequestId};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::JsonRpcHttpError;

/// Media type sent in `content-type` and `accept`
const APP_JSON: &str = "application/json; charset=utf-8";

/// Header carrying the correlation identifier
const X_REQUEST_ID: &str = "x-request-id";

/// JRPC client for calling methods on a remote endpoint
///
/// Holds a `reqwest::Client` handle and a base URL and nothing else: no
/// per-call state, no locks. Methods take `&self`, so one client can serve
/// any number of concurrent calls.
///
/// # Example
///
/// ```ignore
/// use jrpc_http::JsonRpcClient;
/// use jrpc_core::JsonRpcRequest;
///
/// let client = JsonRpcClient::new("https://example.com/api");
///
/// let request = JsonRpcRequest::new("createTodo", serde_json::json!({"title": "milk"}));
/// let response = client.call(request).await;
/// ```
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    client: Client,
    base_url: String,
}

impl JsonRpcClient {
    /// Create a new client with the given base URL
    ///
    /// The base URL should not include a trailing slash; the method name is
    /// appended per call. No timeout is configured here: timeouts, proxies
    /// and credential policy belong to the transport and can be supplied
    /// through [`JsonRpcClient::with_client`].
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a new client with a caller-configured `reqwest::Client`
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call a remote method
    ///
    /// POSTs the envelope to `{base_url}/{method}` and normalizes whatever
    /// comes back. This never returns an `Err`: transport failures, HTTP
    /// failures, unparsable bodies and schema-invalid payloads all come
    /// back as the error-shaped response tagged with the envelope's id.
    pub async fn call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let url = format!("{}/{}", self.base_url, request.method);
        self.dispatch(&url, request).await
    }

    /// Call a remote method at an explicit path under the base URL
    pub async fn call_at(&self, path: &str, request: JsonRpcRequest) -> JsonRpcResponse {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.dispatch(&url, request).await
    }

    /// Send a caller-built request through the same normalization pipeline
    ///
    /// The caller controls the HTTP method, URL, headers and body (possibly
    /// none, for read-only calls); `id` is the correlation identifier every
    /// synthesized error is tagged with. The `accept` and correlation
    /// headers are still set here.
    pub async fn send(&self, id: RequestId, mut request: reqwest::Request) -> JsonRpcResponse {
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static(APP_JSON));
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            headers.insert(X_REQUEST_ID, value);
        }

        debug!("sending prebuilt {} {}", request.method(), request.url());
        match self.client.execute(request).await {
            Ok(response) => self.normalize(id, response).await,
            Err(err) => JsonRpcHttpError::from(err).into_response(id),
        }
    }

    async fn dispatch(&self, url: &str, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("dispatching '{}' to {} as {}", request.method, url, request.id);

        let id = request.id.clone();
        // Headers first: `json()` sets a bare `application/json`
        // content-type when none is present, and `header()` appends
        // rather than replaces.
        let outcome = self
            .client
            .post(url)
            .header(CONTENT_TYPE, APP_JSON)
            .header(ACCEPT, APP_JSON)
            .header(X_REQUEST_ID, id.to_string())
            .json(&request)
            .send()
            .await;

        match outcome {
            Ok(response) => self.normalize(id, response).await,
            Err(err) => JsonRpcHttpError::from(err).into_response(id),
        }
    }

    /// Normalize an HTTP outcome into the response shape
    ///
    /// Status check first: a non-success status short-circuits without
    /// touching the body. Then parse, then classify.
    async fn normalize(&self, id: RequestId, response: reqwest::Response) -> JsonRpcResponse {
        let status = response.status();
        if !status.is_success() {
            debug!("call {} failed with status {}", id, status);
            return JsonRpcHttpError::http(status).into_response(id);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return JsonRpcHttpError::from(err).into_response(id),
        };
        trace!("response body for {}: {}", id, body);

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(err) => return JsonRpcHttpError::from(err).into_response(id),
        };

        match classify_response(&value) {
            Ok(response) => response,
            Err(err) => JsonRpcHttpError::from(err).into_response(id),
        }
    }
}
