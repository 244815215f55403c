//! Browser Transport
//!
//! gloo-net implementation of the core's `Transport`, plus the API base
//! URL kept in local storage.

use async_trait::async_trait;
use budgetstep::client::{ApiRequest, Method, RawResponse, Transport};
use budgetstep::{ClientError, ClientResult};
use gloo_net::http::Request;

/// Same-origin API prefix
pub const DEFAULT_API_BASE: &str = "/api";

/// Local storage key of a custom API base
pub const API_BASE_KEY: &str = "budgetstep_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten());
    normalize_base(stored)
}

/// Set the API base URL in local storage; blank restores the default
pub fn set_api_base(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let result = if url.trim().is_empty() {
            storage.remove_item(API_BASE_KEY)
        } else {
            storage.set_item(API_BASE_KEY, url.trim())
        };
        if result.is_err() {
            web_sys::console::warn_1(&"Failed to store API base".into());
        }
    }
}

fn normalize_base(stored: Option<String>) -> String {
    match stored.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE.to_string(),
    }
}

/// Fetch-based transport against `base`
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base: String,
}

impl GlooTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Transport for the stored API base
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let url = format!("{}{}", self.base, request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };

        let response = match &request.body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| ClientError::Network(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(RawResponse::new(status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(None), "/api");
        assert_eq!(normalize_base(Some("  ".to_string())), "/api");
        assert_eq!(normalize_base(Some("http://budget.local/api/".to_string())), "http://budget.local/api");
    }
}
