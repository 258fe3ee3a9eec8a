//! Network request contract
//!
//! Feature services build [`HttpRequest`] values and hand them to a
//! [`Requestable`] implementation. Successful responses are unwrapped from
//! the backend envelope [`BaseResponse`]; failures are classified into the
//! kernel error taxonomy.
//!
//! The client never reissues tokens itself: a 401 is surfaced as
//! `NetworkError::Unauthorized` and handled one layer up.

pub mod client;
#[cfg(any(test, feature = "testing"))]
pub mod scripted;

use http::Method;
use kernel::NetworkResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use client::ApiClient;
#[cfg(any(test, feature = "testing"))]
pub use scripted::{RecordedRequest, ScriptedClient};

// ============================================================================
// Request
// ============================================================================

/// A typed HTTP request as seen by feature services
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Path relative to the API base URL (`/v1/auth/login`)
    pub path: String,
    pub method: Method,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
    /// Attach the stored access token
    pub is_authenticated: bool,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            is_authenticated: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serialize `body` as the JSON request body
    pub fn with_body<B: Serialize>(mut self, body: &B) -> NetworkResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Mark the request as requiring the access token
    pub fn authenticated(mut self) -> Self {
        self.is_authenticated = true;
        self
    }
}

// ============================================================================
// Envelope
// ============================================================================

/// Uniform response envelope `{ code, message, data }`
#[derive(Debug, Clone, Deserialize)]
pub struct BaseResponse<T> {
    /// Backend status/error code; numeric or string depending on endpoint
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    /// Code rendered as a string (`"M001"`, `"404"`)
    pub fn code_string(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(code)) => Some(code.clone()),
            Some(serde_json::Value::Number(code)) => Some(code.to_string()),
            _ => None,
        }
    }
}

// ============================================================================
// Requestable
// ============================================================================

/// Executes typed requests against the backend
#[trait_variant::make(Requestable: Send)]
pub trait LocalRequestable {
    /// Execute and decode the envelope's `data` field
    ///
    /// Returns `Ok(None)` when the envelope carries no data.
    async fn request<T>(&self, request: HttpRequest) -> NetworkResult<Option<T>>
    where
        T: DeserializeOwned + Send + 'static;

    /// Execute and ignore any response body
    async fn execute(&self, request: HttpRequest) -> NetworkResult<()>;
}
