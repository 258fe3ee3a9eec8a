//! Logout Use Case

use std::sync::Arc;

use kernel::NetworkError;

use crate::application::session::Session;
use crate::domain::api::MemberApi;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<M>
where
    M: MemberApi,
{
    api: Arc<M>,
    session: Arc<Session>,
}

impl<M> LogoutUseCase<M>
where
    M: MemberApi,
{
    pub fn new(api: Arc<M>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    /// Log out on the backend, then drop the refresh token
    ///
    /// A 401 (left after the reissue retry) means the backend already
    /// considers the session gone, so it ends the local session too. Other
    /// failures leave the tokens untouched.
    pub async fn execute(&self) -> AuthResult<()> {
        match self.api.logout().await {
            Ok(message) => {
                tracing::info!(message = message.as_deref().unwrap_or_default(), "Logged out");
            }
            Err(AuthError::Network(NetworkError::Unauthorized)) => {
                tracing::debug!("Logout with an expired session");
            }
            Err(e) => return Err(e),
        }
        self.session.end()
    }
}
