//! Session Manager
//!
//! Façade over the auth use cases, shared by the scene layer and the
//! reissuing client.
//!
//! ## Single-flight reissue
//! Concurrent requests that all hit 401 must not each burn the refresh token.
//! [`SessionManager::reissue_after_unauthorized`] serializes reissues behind an
//! async mutex; a caller that waited on the gate while another caller rotated
//! the access token just retries with the new one.

use std::sync::Arc;

use platform::TokenStore;
use tokio::sync::{Mutex, watch};

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::login::LoginUseCase;
use crate::application::logout::LogoutUseCase;
use crate::application::reissue::ReissueUseCase;
use crate::application::resign::ResignUseCase;
use crate::application::session::Session;
use crate::application::sign_up::SignUpUseCase;
use crate::domain::api::{AuthApi, MemberApi};
use crate::domain::onboarding::{OnboardingDraft, UserOnboardingModel};
use crate::domain::session_state::{SessionState, TokenState};
use crate::error::AuthResult;

/// Auth façade
pub struct SessionManager<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    session: Arc<Session>,
    config: Arc<AuthConfig>,
    reissue_gate: Mutex<()>,
}

impl<A> SessionManager<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, tokens: Arc<TokenStore>, config: Arc<AuthConfig>) -> Self {
        Self {
            api,
            session: Arc::new(Session::new(tokens)),
            config,
            reissue_gate: Mutex::new(()),
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        self.session.tokens()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.tokens().is_logged_in()
    }

    // ========================================================================
    // Use cases
    // ========================================================================

    pub async fn login(&self, social_token: &str) -> AuthResult<()> {
        LoginUseCase::new(self.api.clone(), self.session.clone(), self.config.clone())
            .execute(social_token)
            .await
    }

    pub async fn sign_up(&self, draft: &OnboardingDraft) -> AuthResult<UserOnboardingModel> {
        SignUpUseCase::new(self.api.clone(), self.session.clone(), self.config.clone())
            .execute(draft)
            .await
    }

    /// Log out through `member`, which should retry once after a reissue
    pub async fn logout<M: MemberApi>(&self, member: Arc<M>) -> AuthResult<()> {
        LogoutUseCase::new(member, self.session.clone())
            .execute()
            .await
    }

    /// Delete the account through `member`
    pub async fn resign<M: MemberApi>(&self, member: Arc<M>) -> AuthResult<()> {
        ResignUseCase::new(member, self.session.clone())
            .execute()
            .await
    }

    /// Launch-time check
    pub async fn check_session(&self) -> TokenState {
        let _gate = self.reissue_gate.lock().await;
        CheckSessionUseCase::new(self.api.clone(), self.session.clone())
            .execute()
            .await
    }

    /// Unconditional reissue
    pub async fn reissue(&self) -> AuthResult<()> {
        let _gate = self.reissue_gate.lock().await;
        ReissueUseCase::new(self.api.clone(), self.session.clone())
            .execute()
            .await
    }

    /// Reissue after a request sent with `seen_access_token` got 401
    ///
    /// Skips the backend call when the access token already changed while
    /// waiting for the gate.
    pub async fn reissue_after_unauthorized(&self, seen_access_token: Option<&str>) -> AuthResult<()> {
        self.session.transition(SessionState::TokenExpiring);

        let _gate = self.reissue_gate.lock().await;
        let current = self.session.tokens().access_token();
        if current.is_some() && current.as_deref() != seen_access_token {
            tracing::debug!("Access token already rotated; retrying without reissue");
            self.session.transition(SessionState::LoggedIn);
            return Ok(());
        }

        ReissueUseCase::new(self.api.clone(), self.session.clone())
            .execute()
            .await
    }

    /// Drop every credential and publish `LoggedOut`
    ///
    /// Only a failed write is reported; the session is logged out either way.
    pub fn expire(&self) -> AuthResult<()> {
        if self.session.state() != SessionState::LoggedOut || self.is_logged_in() {
            tracing::info!("Session expired");
        }
        self.session.expire()
    }
}

impl<A> std::fmt::Debug for SessionManager<A>
where
    A: AuthApi,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .field("config", &self.config)
            .finish()
    }
}
