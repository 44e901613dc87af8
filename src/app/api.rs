//! Browser-side fetch helpers for the kodiview REST API.
//!
//! Pages always see a `Result`: a failed request becomes an explicit error
//! value the page must render, distinct from "still loading" and "loaded
//! but empty".

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Error from a UI data fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request never produced a response (network down, server away).
    Transport(String),
    /// Server answered with a non-success status.
    Status(u16, String),
    /// Response body was not the expected JSON shape.
    Decode(String),
    /// Fetching only happens in the browser; the server render leaves
    /// resources pending until hydration.
    Unsupported,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "request failed: {msg}"),
            FetchError::Status(code, text) => write!(f, "server answered {code} {text}"),
            FetchError::Decode(msg) => write!(f, "unexpected response: {msg}"),
            FetchError::Unsupported => write!(f, "fetch unavailable outside the browser"),
        }
    }
}

impl std::error::Error for FetchError {}

/// What a page should render for a fetch resource right now.
pub enum FetchPhase<T> {
    Loading,
    Failed(String),
    Ready(T),
}

/// Collapse a `use_resource` snapshot into a render phase. The
/// server-render placeholder counts as loading, not as an error.
pub fn phase<T>(state: Option<Result<T, FetchError>>) -> FetchPhase<T> {
    match state {
        None => FetchPhase::Loading,
        Some(Err(FetchError::Unsupported)) => FetchPhase::Loading,
        Some(Err(err)) => FetchPhase::Failed(err.to_string()),
        Some(Ok(value)) => FetchPhase::Ready(value),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| FetchError::Transport("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| FetchError::Transport(format!("{e:?}")))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| FetchError::Transport("fetch returned a non-Response".into()))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status(), response.status_text()));
    }

    let text = JsFuture::from(
        response
            .text()
            .map_err(|e| FetchError::Transport(format!("{e:?}")))?,
    )
    .await
    .map_err(|e| FetchError::Transport(format!("{e:?}")))?;
    let text = text.as_string().unwrap_or_default();

    serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Server-side render never fetches; data loads after hydration.
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_json<T: DeserializeOwned>(_path: &str) -> Result<T, FetchError> {
    Err(FetchError::Unsupported)
}

#[cfg(target_arch = "wasm32")]
pub async fn post_json_no_response<B: Serialize>(path: &str, body: &B) -> Result<(), FetchError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let payload = serde_json::to_string(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&wasm_bindgen::JsValue::from_str(&payload));
    let request = web_sys::Request::new_with_str_and_init(path, &init)
        .map_err(|e| FetchError::Transport(format!("{e:?}")))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| FetchError::Transport(format!("{e:?}")))?;

    let window = web_sys::window().ok_or_else(|| FetchError::Transport("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::Transport(format!("{e:?}")))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| FetchError::Transport("fetch returned a non-Response".into()))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status(), response.status_text()));
    }
    Ok(())
}

/// Server-side render never posts either.
#[cfg(not(target_arch = "wasm32"))]
pub async fn post_json_no_response<B: Serialize>(
    _path: &str,
    _body: &B,
) -> Result<(), FetchError> {
    Err(FetchError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_hydration_counts_as_loading_not_error() {
        let snapshot: Option<Result<u32, FetchError>> = Some(Err(FetchError::Unsupported));
        assert!(matches!(phase(snapshot), FetchPhase::Loading));
        assert!(matches!(phase::<u32>(None), FetchPhase::Loading));
    }

    #[test]
    fn real_failures_surface_with_their_message() {
        let snapshot: Option<Result<u32, FetchError>> =
            Some(Err(FetchError::Status(502, "Bad Gateway".to_string())));
        match phase(snapshot) {
            FetchPhase::Failed(message) => assert!(message.contains("502")),
            _ => panic!("expected a failed phase"),
        }
    }

    #[test]
    fn loaded_values_pass_through() {
        match phase(Some(Ok(7))) {
            FetchPhase::Ready(value) => assert_eq!(value, 7),
            _ => panic!("expected a ready phase"),
        }
    }
}
