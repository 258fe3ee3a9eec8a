//! Auth API Traits
//!
//! Backend operations used by the auth use cases. [`AuthApi`] holds the
//! calls that issue tokens; [`MemberApi`] the calls made with one. The HTTP
//! implementations live in the infrastructure layer.

use crate::domain::entity::TokenPair;
use crate::domain::onboarding::UserOnboardingModel;
use crate::domain::value_object::SocialType;
use crate::error::AuthResult;

/// Auth backend
#[trait_variant::make(AuthApi: Send)]
pub trait LocalAuthApi {
    /// Exchange a social access token for a token pair
    async fn login(
        &self,
        social_type: SocialType,
        social_token: &str,
        fcm_token: &str,
    ) -> AuthResult<TokenPair>;

    /// Register a new member with onboarding data
    async fn sign_up(
        &self,
        social_type: SocialType,
        model: &UserOnboardingModel,
        fcm_token: &str,
    ) -> AuthResult<TokenPair>;

    /// Exchange the refresh token for a fresh pair (unauthenticated call)
    async fn reissue(&self, access_token: Option<&str>, refresh_token: &str)
    -> AuthResult<TokenPair>;
}

/// Member endpoints that need a valid access token
///
/// Implementations send through the reissuing client, so a 401 is retried
/// once with a fresh token before it reaches the use case.
#[trait_variant::make(MemberApi: Send)]
pub trait LocalMemberApi {
    /// Invalidate the session on the backend
    async fn logout(&self) -> AuthResult<Option<String>>;

    /// Delete the member account
    async fn resign(&self) -> AuthResult<()>;
}
