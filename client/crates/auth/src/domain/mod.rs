//! Domain Layer
//!
//! Contains the session state machine, onboarding draft, value objects and
//! the auth API trait.

pub mod api;
pub mod entity;
pub mod onboarding;
pub mod session_state;
pub mod value_object;

// Re-exports
pub use api::{AuthApi, LocalAuthApi, LocalMemberApi, MemberApi};
pub use entity::token_pair::TokenPair;
pub use onboarding::{OnboardingDraft, UserOnboardingModel};
pub use session_state::{SessionState, TokenState};
