//! Application Configuration
//!
//! Configuration for the Auth application layer.

use crate::domain::value_object::SocialType;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider used for login and signup
    pub social_type: SocialType,
    /// Reissue-and-retry rounds allowed for one feature request
    pub reissue_attempts: u8,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            social_type: SocialType::Kakao,
            reissue_attempts: 1,
        }
    }
}

impl AuthConfig {
    /// Config that never reissues (401 goes straight to the caller)
    pub fn without_reissue() -> Self {
        Self {
            reissue_attempts: 0,
            ..Default::default()
        }
    }
}
