//! Wire DTOs for the auth endpoints

use serde::{Deserialize, Serialize};

use crate::domain::entity::TokenPair;
use crate::domain::value_object::SocialType;
use crate::error::{AuthError, AuthResult};

/// `POST /v1/auth/login`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub social_type: SocialType,
    pub token: &'a str,
    pub fcm_token: &'a str,
}

/// `POST /v1/auth/signup`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest<'a> {
    pub social_type: SocialType,
    pub token: &'a str,
    pub fcm_token: &'a str,
    pub pregnant_weeks: u8,
    pub baby_nickname: &'a str,
}

/// `POST /v1/auth/reissue`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReissueRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<&'a str>,
    pub refresh_token: &'a str,
}

/// Token pair as returned by login / signup / reissue
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// Both tokens must be present
    pub fn into_pair(response: Option<Self>) -> AuthResult<TokenPair> {
        match response {
            Some(Self {
                access_token: Some(access),
                refresh_token: Some(refresh),
            }) => Ok(TokenPair::new(access, refresh)),
            _ => Err(AuthError::EmptyTokenResponse),
        }
    }
}
