//! Check Session Use Case
//!
//! Launch-time check of the stored credentials.

use std::sync::Arc;

use crate::application::reissue::ReissueUseCase;
use crate::application::session::Session;
use crate::domain::api::AuthApi;
use crate::domain::session_state::TokenState;

/// Check session use case
pub struct CheckSessionUseCase<A>
where
    A: AuthApi,
{
    session: Arc<Session>,
    reissue: ReissueUseCase<A>,
}

impl<A> CheckSessionUseCase<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, session: Arc<Session>) -> Self {
        Self {
            reissue: ReissueUseCase::new(api, session.clone()),
            session,
        }
    }

    /// `Empty` without a refresh token, otherwise reissue decides
    pub async fn execute(&self) -> TokenState {
        if !self.session.tokens().is_logged_in() {
            return TokenState::Empty;
        }

        match self.reissue.execute().await {
            Ok(()) => TokenState::Valid,
            Err(e) => {
                e.log();
                TokenState::Expired
            }
        }
    }
}
