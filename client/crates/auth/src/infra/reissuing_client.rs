//! Reissuing Client
//!
//! [`Requestable`] decorator used by every feature service.
//!
//! ## Flow
//! 1. Send the request with the access token current at send time.
//! 2. On 401 the session moves to `TokenExpiring` and a single-flight reissue
//!    runs (see [`SessionManager::reissue_after_unauthorized`]).
//! 3. Success: the request is retried with the new token.
//! 4. Failure: tokens are already cleared and the session is `LoggedOut`;
//!    the caller receives `Unauthorized`.
//!
//! A request that still gets 401 after the allowed retries expires the session.

use std::sync::Arc;

use kernel::{NetworkError, NetworkResult};
use platform::{HttpRequest, Requestable};
use serde::de::DeserializeOwned;

use crate::application::session_manager::SessionManager;
use crate::domain::api::AuthApi;

/// Reissue-and-retry decorator over a raw transport
pub struct ReissuingClient<C, A>
where
    A: AuthApi,
{
    inner: C,
    sessions: Arc<SessionManager<A>>,
}

impl<C, A> ReissuingClient<C, A>
where
    A: AuthApi,
{
    pub fn new(inner: C, sessions: Arc<SessionManager<A>>) -> Self {
        Self { inner, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionManager<A>> {
        &self.sessions
    }
}

impl<C, A> ReissuingClient<C, A>
where
    C: Requestable + Sync,
    A: AuthApi + Send + Sync + 'static,
{
    /// Handle a 401 for a request sent with `seen_access_token`
    ///
    /// `Ok` means the request should be retried.
    async fn recover(&self, seen_access_token: Option<String>, attempts: &mut u8) -> NetworkResult<()> {
        if *attempts >= self.sessions.config().reissue_attempts {
            tracing::warn!(attempts = *attempts, "Still unauthorized after reissue");
            if let Err(e) = self.sessions.expire() {
                e.log();
            }
            return Err(NetworkError::Unauthorized);
        }
        *attempts += 1;

        self.sessions
            .reissue_after_unauthorized(seen_access_token.as_deref())
            .await
            .map_err(NetworkError::from)
    }
}

impl<C, A> Clone for ReissuingClient<C, A>
where
    C: Clone,
    A: AuthApi,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl<C, A> Requestable for ReissuingClient<C, A>
where
    C: Requestable + Sync,
    A: AuthApi + Send + Sync + 'static,
{
    async fn request<T>(&self, request: HttpRequest) -> NetworkResult<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let mut attempts = 0;
        loop {
            let seen = self.sessions.tokens().access_token();
            match self.inner.request::<T>(request.clone()).await {
                Err(NetworkError::Unauthorized) if request.is_authenticated => {
                    tracing::debug!(path = %request.path, "Request unauthorized");
                    self.recover(seen, &mut attempts).await?;
                }
                other => return other,
            }
        }
    }

    async fn execute(&self, request: HttpRequest) -> NetworkResult<()> {
        let mut attempts = 0;
        loop {
            let seen = self.sessions.tokens().access_token();
            match self.inner.execute(request.clone()).await {
                Err(NetworkError::Unauthorized) if request.is_authenticated => {
                    tracing::debug!(path = %request.path, "Request unauthorized");
                    self.recover(seen, &mut attempts).await?;
                }
                other => return other,
            }
        }
    }
}
