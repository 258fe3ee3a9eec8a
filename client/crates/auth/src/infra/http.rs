//! HTTP Auth API
//!
//! [`AuthApi`] over a raw [`Requestable`]. Must be given the plain transport,
//! never the reissuing client: a 401 from reissue itself ends the session.
//!
//! [`MemberApi`] is the opposite: give it the reissuing client, so logout and
//! account deletion survive an expired access token.

use platform::{HttpRequest, Requestable};

use crate::domain::api::{AuthApi, MemberApi};
use crate::domain::entity::TokenPair;
use crate::domain::onboarding::UserOnboardingModel;
use crate::domain::value_object::SocialType;
use crate::error::AuthResult;
use crate::infra::dto::{LoginRequest, ReissueRequest, SignUpRequest, TokenResponse};

const LOGIN_PATH: &str = "/v1/auth/login";
const SIGN_UP_PATH: &str = "/v1/auth/signup";
const REISSUE_PATH: &str = "/v1/auth/reissue";
const LOGOUT_PATH: &str = "/v1/auth/logout";
const MEMBER_PATH: &str = "/v1/member";

/// Auth API over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthApi<C> {
    client: C,
}

impl<C> HttpAuthApi<C>
where
    C: Requestable + Sync,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    async fn issue(&self, request: HttpRequest) -> AuthResult<TokenPair> {
        let response = self.client.request::<TokenResponse>(request).await?;
        TokenResponse::into_pair(response)
    }
}

impl<C> AuthApi for HttpAuthApi<C>
where
    C: Requestable + Sync,
{
    async fn login(
        &self,
        social_type: SocialType,
        social_token: &str,
        fcm_token: &str,
    ) -> AuthResult<TokenPair> {
        let request = HttpRequest::post(LOGIN_PATH).with_body(&LoginRequest {
            social_type,
            token: social_token,
            fcm_token,
        })?;
        self.issue(request).await
    }

    async fn sign_up(
        &self,
        social_type: SocialType,
        model: &UserOnboardingModel,
        fcm_token: &str,
    ) -> AuthResult<TokenPair> {
        let request = HttpRequest::post(SIGN_UP_PATH).with_body(&SignUpRequest {
            social_type,
            token: &model.kakao_access_token,
            fcm_token,
            pregnant_weeks: model.pregnancy_weeks.get(),
            baby_nickname: model.fetal_nickname.as_str(),
        })?;
        self.issue(request).await
    }

    async fn reissue(
        &self,
        access_token: Option<&str>,
        refresh_token: &str,
    ) -> AuthResult<TokenPair> {
        let request = HttpRequest::post(REISSUE_PATH).with_body(&ReissueRequest {
            access_token,
            refresh_token,
        })?;
        self.issue(request).await
    }
}

/// Member API over HTTP
#[derive(Debug, Clone)]
pub struct HttpMemberApi<C> {
    client: C,
}

impl<C> HttpMemberApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C> MemberApi for HttpMemberApi<C>
where
    C: Requestable + Sync,
{
    async fn logout(&self) -> AuthResult<Option<String>> {
        let request = HttpRequest::post(LOGOUT_PATH).authenticated();
        Ok(self.client.request::<String>(request).await?)
    }

    async fn resign(&self) -> AuthResult<()> {
        let request = HttpRequest::delete(MEMBER_PATH).authenticated();
        Ok(self.client.execute(request).await?)
    }
}
