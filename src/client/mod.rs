//! Budget API Client
//!
//! Typed access to the budgeting service's REST API.
//!
//! ## Layers
//!
//! - [`Transport`]: performs one HTTP exchange and hands back status + text.
//!   Implemented with reqwest natively and with gloo-net in the browser.
//! - [`Api`]: normalizes every response the same way. The body is JSON when
//!   it parses and raw text otherwise; a non-success status becomes
//!   [`ClientError::Status`] carrying the server's `detail`, the raw text,
//!   or `HTTP <status>`.
//! - [`decode`]: turns a normalized [`Body`] into entities.
//!
//! No retries and no timeouts: a failed call propagates straight to the
//! handler that made it.

pub mod decode;
#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "native")]
pub mod http;

pub use decode::DecodeError;
#[cfg(feature = "native")]
pub use http::HttpTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::model::{
    Account, Budget, Category, CopyPlanned, CopyResult, Health, Id, NewAccount, NewBudget,
    NewCategory, NewOperation, NewStep, Operation, Step, Summary,
};

/// HTTP methods the client uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One request, relative to the transport's base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Origin-relative path such as `/steps/3/feed`
    pub path: String,
    /// Serialized as JSON when present
    pub body: Option<Value>,
}

/// Status and body text exactly as received
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub text: String,
}

impl RawResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP exchanges against a fixed origin.
///
/// Futures are not required to be `Send`: the browser transport runs on the
/// single-threaded event loop.
#[async_trait(?Send)]
pub trait Transport {
    /// Send `request`; only failures to obtain a response are errors here.
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse>;
}

/// A response body: JSON when it parses, raw text otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Empty text is JSON `null`
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Body::Json(Value::Null);
        }
        match serde_json::from_str(text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(text.to_string()),
        }
    }
}

/// Message for a non-success response: `detail`, else raw text, else the status
pub fn error_message(status: u16, text: &str, body: &Body) -> String {
    if let Body::Json(Value::Object(map)) = body {
        match map.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => return detail.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }
    if text.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        text.to_string()
    }
}

/// Typed client over a [`Transport`]
pub struct Api<T> {
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET path`
    pub async fn get(&self, path: &str) -> ClientResult<Body> {
        self.request(Method::Get, path, None).await
    }

    /// `POST path` with `body` serialized as JSON
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<Body> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::Decode {
            endpoint: path.to_string(),
            reason: format!("request body: {}", e),
        })?;
        self.request(Method::Post, path, Some(value)).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Body> {
        let response = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                body,
            })
            .await?;

        tracing::debug!(method = method.as_str(), path, status = response.status, "API response");

        let body = Body::parse(&response.text);
        if !response.is_success() {
            return Err(ClientError::Status {
                status: response.status,
                message: error_message(response.status, &response.text, &body),
            });
        }
        Ok(body)
    }

    /// Fetch a list; a non-array body counts as empty and is logged
    async fn list<D: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<D>> {
        let body = self.get(path).await?;
        match decode::list(&body) {
            Ok(items) => Ok(items),
            Err(DecodeError::NotAList { found }) => {
                tracing::warn!(endpoint = path, found, "Unexpected list payload, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(decode_failure(path, e)),
        }
    }

    async fn create<B: Serialize, D: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<D> {
        let body = self.post(path, body).await?;
        decode::object(&body).map_err(|e| decode_failure(path, e))
    }

    pub async fn health(&self) -> ClientResult<Health> {
        let body = self.get("/health").await?;
        decode::object(&body).map_err(|e| decode_failure("/health", e))
    }

    pub async fn budgets(&self) -> ClientResult<Vec<Budget>> {
        self.list("/budgets").await
    }

    pub async fn create_budget(&self, budget: &NewBudget) -> ClientResult<Budget> {
        self.create("/budgets", budget).await
    }

    /// All accounts, across budgets
    pub async fn accounts(&self) -> ClientResult<Vec<Account>> {
        self.list("/accounts").await
    }

    pub async fn create_account(&self, account: &NewAccount) -> ClientResult<Account> {
        self.create("/accounts", account).await
    }

    /// All categories, across budgets
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.list("/categories").await
    }

    pub async fn create_category(&self, category: &NewCategory) -> ClientResult<Category> {
        self.create("/categories", category).await
    }

    pub async fn steps(&self, budget_id: Id) -> ClientResult<Vec<Step>> {
        self.list(&format!("/steps?budget_id={}", budget_id)).await
    }

    pub async fn create_step(&self, step: &NewStep) -> ClientResult<Step> {
        self.create("/steps", step).await
    }

    pub async fn summary(&self, step_id: Id) -> ClientResult<Summary> {
        let path = format!("/steps/{}/summary", step_id);
        let body = self.get(&path).await?;
        match body {
            Body::Json(Value::Null) => Ok(Summary::default()),
            body => decode::object(&body).map_err(|e| decode_failure(&path, e)),
        }
    }

    /// Operations of a step in server order
    pub async fn feed(&self, step_id: Id) -> ClientResult<Vec<Operation>> {
        self.list(&format!("/steps/{}/feed", step_id)).await
    }

    pub async fn create_operation(&self, operation: &NewOperation) -> ClientResult<Operation> {
        self.create("/operations", operation).await
    }

    pub async fn copy_planned(&self, from_step_id: Id, to_step_id: Id) -> ClientResult<CopyResult> {
        let path = format!("/steps/{}/copy_planned", from_step_id);
        let body = self.post(&path, &CopyPlanned { to_step_id }).await?;
        match body {
            Body::Json(Value::Null) => Ok(CopyResult::default()),
            body => decode::object(&body).map_err(|e| decode_failure(&path, e)),
        }
    }
}

fn decode_failure(endpoint: &str, error: DecodeError) -> ClientError {
    ClientError::Decode {
        endpoint: endpoint.to_string(),
        reason: error.to_string(),
    }
}
