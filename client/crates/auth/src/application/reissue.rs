//! Reissue Use Case
//!
//! Exchanges the stored refresh token for a fresh pair. Any failure ends the
//! session: both tokens are cleared and the state becomes `LoggedOut`.

use std::sync::Arc;

use crate::application::session::Session;
use crate::domain::api::AuthApi;
use crate::domain::session_state::SessionState;
use crate::error::{AuthError, AuthResult};

/// Reissue use case
pub struct ReissueUseCase<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    session: Arc<Session>,
}

impl<A> ReissueUseCase<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    pub async fn execute(&self) -> AuthResult<()> {
        let tokens = self.session.tokens().snapshot();
        let Some(refresh_token) = tokens.refresh_token else {
            self.end_session();
            return Err(AuthError::MissingRefreshToken);
        };

        self.session.transition(SessionState::Reissuing);

        match self
            .api
            .reissue(tokens.access_token.as_deref(), &refresh_token)
            .await
        {
            Ok(pair) => {
                if let Err(e) = self.session.establish(&pair) {
                    // The old pair was already spent on this reissue
                    self.end_session();
                    return Err(AuthError::ReissueRejected(e.to_network_error()));
                }
                tracing::info!("Token reissued");
                Ok(())
            }
            Err(e) => {
                self.end_session();
                let cause = match e {
                    AuthError::Network(e) => e,
                    other => other.to_network_error(),
                };
                Err(AuthError::ReissueRejected(cause))
            }
        }
    }

    /// Reissue failures always end the session; storage errors only get logged
    fn end_session(&self) {
        if let Err(e) = self.session.expire() {
            e.log();
        }
    }
}
