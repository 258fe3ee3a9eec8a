//! reqwest-backed API client
//!
//! Joins request paths onto the configured base URL, attaches the access
//! token for authenticated requests and classifies failures.

use std::sync::Arc;

use http::header;
use kernel::{NetworkError, NetworkResult};
use serde::de::DeserializeOwned;

use super::{BaseResponse, HttpRequest, Requestable};
use crate::config::ClientConfig;
use crate::token::TokenStore;

/// HTTP client for the content backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// ## Errors
    /// * `NetworkError::UrlEncoding` - the base URL is not a valid URI
    pub fn new(config: &ClientConfig, tokens: Arc<TokenStore>) -> NetworkResult<Self> {
        config.base_url.parse::<http::Uri>()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Absolute URL for a request path
    fn url_for(&self, path: &str) -> NetworkResult<String> {
        let url = format!("{}{}", self.base_url, path);
        url.parse::<http::Uri>()?;
        Ok(url)
    }

    /// Send the request and return status + raw body
    async fn send(&self, request: HttpRequest) -> NetworkResult<(u16, Vec<u8>)> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(header::ACCEPT, "application/json");

        if request.is_authenticated {
            // Read at send time so a request issued after a reissue carries the new token
            match self.tokens.access_token() {
                Some(token) => builder = builder.bearer_auth(token),
                None => tracing::debug!(path = %request.path, "Authenticated request without access token"),
            }
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(path = %request.path, error = %e, "Request failed before response");
            NetworkError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status,
            "Response received"
        );

        Ok((status, body))
    }
}

/// Classify a non-2xx response, reading code/message from the envelope if present
fn classify(status: u16, body: &[u8]) -> Option<NetworkError> {
    let envelope = serde_json::from_slice::<BaseResponse<serde_json::Value>>(body).ok();
    let code = envelope.as_ref().and_then(|e| e.code_string());
    let message = envelope
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_default();
    NetworkError::from_status(status, code, &message)
}

/// Decode the envelope of a 2xx response
fn decode<T: DeserializeOwned>(body: &[u8]) -> NetworkResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let envelope: BaseResponse<T> = serde_json::from_slice(body)?;
    Ok(envelope.data)
}

impl Requestable for ApiClient {
    async fn request<T>(&self, request: HttpRequest) -> NetworkResult<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (status, body) = self.send(request).await?;
        if let Some(err) = classify(status, &body) {
            return Err(err);
        }
        decode(&body)
    }

    async fn execute(&self, request: HttpRequest) -> NetworkResult<()> {
        let (status, body) = self.send(request).await?;
        match classify(status, &body) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
