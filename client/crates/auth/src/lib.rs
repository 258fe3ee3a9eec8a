//! Auth (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session state machine, onboarding draft, value objects, API trait
//! - `application/` - Use cases and the session manager façade
//! - `infra/` - HTTP implementation of the auth API, reissue-and-retry client
//!
//! ## Features
//! - Social (Kakao) login and signup with onboarding data
//! - Token reissue with a single-flight guard
//! - Logout and account deletion (resign)
//!
//! ## Session Model
//! - The stored refresh token is the authoritative "logged in" signal
//! - A failed reissue clears the token pair and moves the session to LoggedOut
//! - Feature requests, logout and resign go through [`ReissuingClient`],
//!   which reissues once on 401

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session::Session;
pub use application::session_manager::SessionManager;
pub use domain::api::{AuthApi, MemberApi};
pub use domain::onboarding::{OnboardingDraft, UserOnboardingModel};
pub use domain::session_state::{SessionState, TokenState};
pub use error::{AuthError, AuthResult};
pub use infra::http::{HttpAuthApi, HttpMemberApi};
pub use infra::reissuing_client::ReissuingClient;

// Re-export kernel error types for unified error handling
pub use kernel::{ErrorKind, NetworkError, NetworkResult};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
