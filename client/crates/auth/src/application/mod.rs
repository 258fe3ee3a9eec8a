//! Application Layer
//!
//! Use cases and the session manager façade.

pub mod check_session;
pub mod config;
pub mod login;
pub mod logout;
pub mod reissue;
pub mod resign;
pub mod session;
pub mod session_manager;
pub mod sign_up;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use reissue::ReissueUseCase;
pub use resign::ResignUseCase;
pub use session::Session;
pub use session_manager::SessionManager;
pub use sign_up::SignUpUseCase;
