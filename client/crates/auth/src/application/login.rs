//! Login Use Case
//!
//! Exchanges a social access token for a token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::Session;
use crate::domain::api::AuthApi;
use crate::domain::session_state::SessionState;
use crate::error::{AuthError, AuthResult};

/// Login use case
pub struct LoginUseCase<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    session: Arc<Session>,
    config: Arc<AuthConfig>,
}

impl<A> LoginUseCase<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, session: Arc<Session>, config: Arc<AuthConfig>) -> Self {
        Self {
            api,
            session,
            config,
        }
    }

    pub async fn execute(&self, social_token: &str) -> AuthResult<()> {
        let fcm_token = self
            .session
            .tokens()
            .fcm_token()
            .ok_or(AuthError::MissingFcmToken)?;

        self.session.transition(SessionState::Authenticating);

        match self
            .api
            .login(self.config.social_type, social_token, &fcm_token)
            .await
        {
            Ok(pair) => {
                if let Err(e) = self.session.establish(&pair) {
                    self.session.transition(SessionState::LoggedOut);
                    return Err(e);
                }
                tracing::info!(social_type = %self.config.social_type, "Logged in");
                Ok(())
            }
            Err(e) => {
                self.session.transition(SessionState::LoggedOut);
                Err(e)
            }
        }
    }
}
