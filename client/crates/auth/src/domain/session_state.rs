//! Session State Machine
//!
//! ```text
//! LoggedOut → Authenticating → LoggedIn → TokenExpiring → Reissuing → LoggedIn
//!                   ↓                                          ↓
//!               LoggedOut                                  LoggedOut
//! ```
//!
//! Every state may fall back to `LoggedOut` (logout, resign, failed reissue).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    LoggedOut,
    Authenticating,
    LoggedIn,
    TokenExpiring,
    Reissuing,
}

impl SessionState {
    /// Whether `self → next` is a legal transition
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;

        match (self, next) {
            (_, LoggedOut) => true,
            (LoggedOut, Authenticating) => true,
            (Authenticating, LoggedIn) => true,
            (LoggedIn, TokenExpiring | Reissuing) => true,
            (TokenExpiring, Reissuing | LoggedIn) => true,
            (Reissuing, LoggedIn) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoggedOut => "logged_out",
            Self::Authenticating => "authenticating",
            Self::LoggedIn => "logged_in",
            Self::TokenExpiring => "token_expiring",
            Self::Reissuing => "reissuing",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the launch-time session check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Reissue succeeded; show the main flow
    Valid,
    /// Reissue was rejected; tokens were cleared
    Expired,
    /// No refresh token stored
    Empty,
}
