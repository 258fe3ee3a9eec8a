//! Session
//!
//! Couples the token store with the observable session state. All token
//! writes that change the auth state go through here so the persisted tokens
//! and the published [`SessionState`] never disagree.

use std::sync::Arc;

use platform::TokenStore;
use tokio::sync::watch;

use crate::domain::entity::TokenPair;
use crate::domain::session_state::SessionState;
use crate::error::AuthResult;

/// Token store + session state channel
#[derive(Debug)]
pub struct Session {
    tokens: Arc<TokenStore>,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Initial state is `LoggedIn` iff a refresh token is stored
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        let initial = if tokens.is_logged_in() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        };
        let (state, _) = watch::channel(initial);
        Self { tokens, state }
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Move to `next` if the transition is legal
    ///
    /// Returns whether the state is `next` afterwards.
    pub fn transition(&self, next: SessionState) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|current| {
            if *current == next {
                applied = true;
                return false;
            }
            if !current.can_transition_to(next) {
                tracing::warn!(from = %current, to = %next, "Ignored invalid session transition");
                return false;
            }
            tracing::info!(from = %current, to = %next, "Session state changed");
            *current = next;
            applied = true;
            true
        });
        applied
    }

    /// Persist a freshly issued pair and mark the session logged in
    ///
    /// The state is left alone when the pair cannot be persisted.
    pub fn establish(&self, pair: &TokenPair) -> AuthResult<()> {
        self.tokens.store_pair(
            Some(pair.access_token.clone()),
            Some(pair.refresh_token.clone()),
        )?;
        self.transition(SessionState::LoggedIn);
        Ok(())
    }

    /// Logout / resign: drop the refresh token
    ///
    /// The session is `LoggedOut` afterwards even when the write fails; the
    /// error reports that the persisted token is still there.
    pub fn end(&self) -> AuthResult<()> {
        let cleared = self.tokens.clear_refresh_token();
        self.transition(SessionState::LoggedOut);
        Ok(cleared?)
    }

    /// Failed reissue: drop the whole pair
    pub fn expire(&self) -> AuthResult<()> {
        let cleared = self.tokens.clear();
        self.transition(SessionState::LoggedOut);
        Ok(cleared?)
    }
}
