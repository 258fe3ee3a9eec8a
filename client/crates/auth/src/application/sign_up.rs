//! Sign Up Use Case
//!
//! Registers a new member from a finished onboarding draft.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::Session;
use crate::domain::api::AuthApi;
use crate::domain::onboarding::{OnboardingDraft, UserOnboardingModel};
use crate::domain::session_state::SessionState;
use crate::error::{AuthError, AuthResult};

/// Sign up use case
pub struct SignUpUseCase<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    session: Arc<Session>,
    config: Arc<AuthConfig>,
}

impl<A> SignUpUseCase<A>
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

    /// Finalize `draft` and sign up
    ///
    /// Nothing is sent when a draft field is missing.
    pub async fn execute(&self, draft: &OnboardingDraft) -> AuthResult<UserOnboardingModel> {
        let model = draft.finalize()?;
        let fcm_token = self
            .session
            .tokens()
            .fcm_token()
            .ok_or(AuthError::MissingFcmToken)?;

        self.session.transition(SessionState::Authenticating);

        match self
            .api
            .sign_up(self.config.social_type, &model, &fcm_token)
            .await
        {
            Ok(pair) => {
                if let Err(e) = self.session.establish(&pair) {
                    self.session.transition(SessionState::LoggedOut);
                    return Err(e);
                }
                tracing::info!(
                    pregnancy_weeks = model.pregnancy_weeks.get(),
                    "Signed up"
                );
                Ok(model)
            }
            Err(e) => {
                self.session.transition(SessionState::LoggedOut);
                Err(e)
            }
        }
    }
}
