//! Kodi JSON-RPC transport
//!
//! Implements JSON-RPC 2.0 over HTTP POST, the protocol spoken by Kodi's
//! web server interface (`/jsonrpc`).
//! Documentation: https://kodi.wiki/view/JSON-RPC_API
//!
//! The transport never retries; retry policy belongs to the query cache
//! layered on top of it.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Request ID for JSON-RPC calls (aids debugging in Kodi logs)
const RPC_REQUEST_ID: i32 = 1080;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced by the RPC layer.
///
/// `Clone` so the query cache can hand the same failure to every waiter
/// coalesced onto a single fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// Network or HTTP failure before a JSON-RPC response was obtained.
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered with an RPC-level error payload.
    #[error("server error {code}: {message}")]
    Protocol { code: i64, message: String },
    /// The response arrived but was not the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The cancellation token fired while the request was in flight.
    #[error("request cancelled")]
    Cancelled,
}

/// A JSON-RPC call surface.
///
/// The library client only ever sees this trait, which keeps every
/// operation testable against a mock endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one named call and return its `result` payload.
    async fn call(
        &self,
        method: &str,
        params: Value,
        cancel: &CancellationToken,
    ) -> Result<Value, RpcError>;
}

/// HTTP transport talking to a real Kodi instance.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: String, username: Option<String>, password: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            endpoint,
            username,
            password,
        }
    }

    async fn post(&self, body: &Value) -> Result<Value, RpcError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(body);

        // Add basic auth if configured
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RpcError::Transport(format!(
                "Kodi request failed: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        method: &str,
        params: Value,
        cancel: &CancellationToken,
    ) -> Result<Value, RpcError> {
        if cancel.is_cancelled() {
            return Err(RpcError::Cancelled);
        }

        let body = json!({
            "jsonrpc": "2.0",
            "id": RPC_REQUEST_ID,
            "method": method,
            "params": params,
        });

        debug!(method, "Kodi request");

        let data = tokio::select! {
            _ = cancel.cancelled() => return Err(RpcError::Cancelled),
            result = self.post(&body) => result?,
        };

        let result = unwrap_response(method, data)?;

        debug!(method, "Kodi response");
        Ok(result)
    }
}

/// Split a JSON-RPC response into its `result`, mapping an `error` payload
/// to [`RpcError::Protocol`].
fn unwrap_response(method: &str, data: Value) -> Result<Value, RpcError> {
    if let Some(error) = data.get("error") {
        if !error.is_null() {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            debug!(method, code, "Kodi error response");
            return Err(RpcError::Protocol { code, message });
        }
    }
    Ok(data.get("result").cloned().unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_response_returns_result_payload() {
        let data = json!({ "jsonrpc": "2.0", "id": 1080, "result": { "pong": true } });
        let result = unwrap_response("JSONRPC.Ping", data).unwrap();
        assert_eq!(result, json!({ "pong": true }));
    }

    #[test]
    fn unwrap_response_maps_error_payload_to_protocol_error() {
        let data = json!({
            "jsonrpc": "2.0",
            "id": 1080,
            "error": { "code": -32601, "message": "Method not found" }
        });
        let err = unwrap_response("Bogus.Method", data).unwrap_err();
        assert_eq!(
            err,
            RpcError::Protocol {
                code: -32601,
                message: "Method not found".to_string()
            }
        );
    }

    #[test]
    fn unwrap_response_tolerates_null_error_field() {
        let data = json!({ "jsonrpc": "2.0", "id": 1080, "error": null, "result": "pong" });
        let result = unwrap_response("JSONRPC.Ping", data).unwrap();
        assert_eq!(result, json!("pong"));
    }

    #[test]
    fn unwrap_response_defaults_missing_result_to_null() {
        let data = json!({ "jsonrpc": "2.0", "id": 1080 });
        let result = unwrap_response("JSONRPC.Ping", data).unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn call_refuses_already_cancelled_token() {
        let transport = HttpTransport::new(
            "http://127.0.0.1:1/jsonrpc".to_string(),
            None,
            None,
        );
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = transport
            .call("JSONRPC.Ping", json!({}), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err, RpcError::Cancelled);
    }
}
