//! In-memory scripted transport
//!
//! Replays canned `data` payloads (or errors) per request path and records
//! every request together with the access token that would have been sent.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use kernel::{NetworkError, NetworkResult};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;

use super::{HttpRequest, Requestable};
use crate::token::TokenStore;

/// A request as observed by [`ScriptedClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub request: HttpRequest,
    /// Access token attached to an authenticated request
    pub access_token: Option<String>,
}

/// Scripted [`Requestable`] for tests
#[derive(Clone)]
pub struct ScriptedClient {
    tokens: Arc<TokenStore>,
    responses: Arc<Mutex<HashMap<String, VecDeque<NetworkResult<serde_json::Value>>>>>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedClient {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Self {
            tokens,
            responses: Arc::new(Mutex::new(HashMap::new())),
            recorded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful `data` payload for `path`
    pub fn respond(&self, path: &str, data: serde_json::Value) -> &Self {
        self.push(path, Ok(data))
    }

    /// Queue a failure for `path`
    pub fn fail(&self, path: &str, error: NetworkError) -> &Self {
        self.push(path, Err(error))
    }

    fn push(&self, path: &str, response: NetworkResult<serde_json::Value>) -> &Self {
        self.responses
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// All requests seen so far, in order
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().clone()
    }

    /// Requests seen for one path
    pub fn recorded_for(&self, path: &str) -> Vec<RecordedRequest> {
        self.recorded
            .lock()
            .iter()
            .filter(|r| r.request.path == path)
            .cloned()
            .collect()
    }

    fn next_response(&self, request: HttpRequest) -> NetworkResult<serde_json::Value> {
        let access_token = if request.is_authenticated {
            self.tokens.access_token()
        } else {
            None
        };
        let path = request.path.clone();
        self.recorded.lock().push(RecordedRequest {
            request,
            access_token,
        });

        self.responses
            .lock()
            .get_mut(&path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(NetworkError::client("404", format!("no scripted response for {path}"))))
    }
}

impl Requestable for ScriptedClient {
    async fn request<T>(&self, request: HttpRequest) -> NetworkResult<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let data = self.next_response(request)?;
        if data.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(data)?))
    }

    async fn execute(&self, request: HttpRequest) -> NetworkResult<()> {
        self.next_response(request).map(|_| ())
    }
}
