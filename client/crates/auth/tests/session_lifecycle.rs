//! Session lifecycle tests over the scripted transport

use std::sync::Arc;

use auth::models::{FetalNickname, PregnancyWeeks};
use auth::{
    AuthConfig, AuthError, ErrorKind, HttpAuthApi, HttpMemberApi, NetworkError, OnboardingDraft,
    ReissuingClient, SessionManager, SessionState, TokenState,
};
use platform::network::ScriptedClient;
use platform::token::TokenStorage;
use platform::{HttpRequest, Requestable, Token, TokenStore, TokenStoreError};
use serde_json::json;

type Manager = SessionManager<HttpAuthApi<ScriptedClient>>;
type Client = ReissuingClient<ScriptedClient, HttpAuthApi<ScriptedClient>>;

struct Harness {
    tokens: Arc<TokenStore>,
    transport: ScriptedClient,
    sessions: Arc<Manager>,
    client: Client,
    member: Arc<HttpMemberApi<Client>>,
}

fn harness(access: Option<&str>, refresh: Option<&str>) -> Harness {
    let tokens = Arc::new(TokenStore::in_memory());
    tokens.set_fcm_token("fcm-1").unwrap();
    tokens
        .store_pair(access.map(String::from), refresh.map(String::from))
        .unwrap();

    let transport = ScriptedClient::new(tokens.clone());
    let sessions = Arc::new(SessionManager::new(
        Arc::new(HttpAuthApi::new(transport.clone())),
        tokens.clone(),
        Arc::new(AuthConfig::default()),
    ));
    let client = ReissuingClient::new(transport.clone(), sessions.clone());
    let member = Arc::new(HttpMemberApi::new(client.clone()));

    Harness {
        tokens,
        transport,
        sessions,
        client,
        member,
    }
}

/// Storage that loads an FCM token but refuses every write
struct ReadOnlyStorage;

impl TokenStorage for ReadOnlyStorage {
    fn load(&self) -> Result<Token, TokenStoreError> {
        Ok(Token {
            fcm_token: Some("fcm-1".into()),
            ..Token::default()
        })
    }

    fn save(&self, _token: &Token) -> Result<(), TokenStoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

fn token_json(access: &str, refresh: &str) -> serde_json::Value {
    json!({ "accessToken": access, "refreshToken": refresh })
}

// ============================================================================
// Login / signup
// ============================================================================

#[tokio::test]
async fn test_login_stores_tokens() {
    let h = harness(None, None);
    h.transport.respond("/v1/auth/login", token_json("a1", "r1"));

    h.sessions.login("kakao-token").await.unwrap();

    assert_eq!(h.sessions.state(), SessionState::LoggedIn);
    assert_eq!(h.tokens.access_token().as_deref(), Some("a1"));
    assert_eq!(h.tokens.refresh_token().as_deref(), Some("r1"));

    let sent = h.transport.recorded_for("/v1/auth/login");
    assert_eq!(
        sent[0].request.body,
        Some(json!({ "socialType": "KAKAO", "token": "kakao-token", "fcmToken": "fcm-1" }))
    );
    assert!(!sent[0].request.is_authenticated);
}

#[tokio::test]
async fn test_login_without_fcm_token_sends_nothing() {
    let tokens = Arc::new(TokenStore::in_memory());
    let transport = ScriptedClient::new(tokens.clone());
    let sessions = SessionManager::new(
        Arc::new(HttpAuthApi::new(transport.clone())),
        tokens,
        Arc::new(AuthConfig::default()),
    );

    let result = sessions.login("kakao-token").await;

    assert_eq!(result, Err(AuthError::MissingFcmToken));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Client);
    assert!(transport.recorded().is_empty());
}

#[tokio::test]
async fn test_failed_login_returns_to_logged_out() {
    let h = harness(None, None);
    h.transport
        .fail("/v1/auth/login", NetworkError::client("404", "not registered"));

    let result = h.sessions.login("kakao-token").await;

    assert!(matches!(result, Err(AuthError::Network(NetworkError::Client { .. }))));
    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.refresh_token().is_none());
}

#[tokio::test]
async fn test_login_with_unwritable_storage_stays_logged_out() {
    let tokens = Arc::new(TokenStore::open(ReadOnlyStorage).unwrap());
    let transport = ScriptedClient::new(tokens.clone());
    let sessions = SessionManager::new(
        Arc::new(HttpAuthApi::new(transport.clone())),
        tokens.clone(),
        Arc::new(AuthConfig::default()),
    );
    transport.respond("/v1/auth/login", token_json("a1", "r1"));

    let result = sessions.login("kakao-token").await;

    assert!(matches!(result, Err(AuthError::Storage(_))));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Client);
    assert_eq!(sessions.state(), SessionState::LoggedOut);
    assert!(tokens.access_token().is_none());
    assert!(tokens.refresh_token().is_none());
}

#[tokio::test]
async fn test_sign_up_with_incomplete_draft_fails_fast() {
    let h = harness(None, None);
    let draft = OnboardingDraft {
        kakao_access_token: Some("kakao".into()),
        pregnancy_weeks: Some(PregnancyWeeks::new(12).unwrap()),
        fetal_nickname: None,
    };

    let result = h.sessions.sign_up(&draft).await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::BadCasting);
    assert!(h.transport.recorded().is_empty());
}

#[tokio::test]
async fn test_sign_up_sends_onboarding_fields() {
    let h = harness(None, None);
    h.transport.respond("/v1/auth/signup", token_json("a1", "r1"));
    let draft = OnboardingDraft {
        kakao_access_token: Some("kakao".into()),
        pregnancy_weeks: Some(PregnancyWeeks::new(12).unwrap()),
        fetal_nickname: Some(FetalNickname::new("콩콩이").unwrap()),
    };

    let model = h.sessions.sign_up(&draft).await.unwrap();

    assert_eq!(model.fetal_nickname.as_str(), "콩콩이");
    assert_eq!(h.sessions.state(), SessionState::LoggedIn);
    let sent = h.transport.recorded_for("/v1/auth/signup");
    assert_eq!(
        sent[0].request.body,
        Some(json!({
            "socialType": "KAKAO",
            "token": "kakao",
            "fcmToken": "fcm-1",
            "pregnantWeeks": 12,
            "babyNickname": "콩콩이",
        }))
    );
}

// ============================================================================
// Reissue and retry
// ============================================================================

#[tokio::test]
async fn test_unauthorized_request_is_retried_with_new_token() {
    let h = harness(Some("old"), Some("r0"));
    h.transport
        .fail("/v1/article/today", NetworkError::Unauthorized)
        .respond("/v1/article/today", json!(7));
    h.transport.respond("/v1/auth/reissue", token_json("new", "r1"));

    let value: Option<i32> = h
        .client
        .request(HttpRequest::get("/v1/article/today").authenticated())
        .await
        .unwrap();

    assert_eq!(value, Some(7));
    assert_eq!(h.sessions.state(), SessionState::LoggedIn);

    let sent = h.transport.recorded_for("/v1/article/today");
    assert_eq!(sent[0].access_token.as_deref(), Some("old"));
    assert_eq!(sent[1].access_token.as_deref(), Some("new"));

    let reissue = h.transport.recorded_for("/v1/auth/reissue");
    assert_eq!(
        reissue[0].request.body,
        Some(json!({ "accessToken": "old", "refreshToken": "r0" }))
    );
}

#[tokio::test]
async fn test_failed_reissue_never_reuses_stale_token() {
    let h = harness(Some("stale"), Some("r0"));
    h.transport
        .fail("/v1/article/today", NetworkError::Unauthorized)
        .fail("/v1/auth/reissue", NetworkError::client("401", "expired"))
        .respond("/v1/curriculum/progress", json!(null));

    let result = h
        .client
        .request::<i32>(HttpRequest::get("/v1/article/today").authenticated())
        .await;

    assert_eq!(result, Err(NetworkError::Unauthorized));
    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.refresh_token().is_none());
    assert!(h.tokens.access_token().is_none());
    assert_eq!(h.tokens.fcm_token().as_deref(), Some("fcm-1"));

    let _ = h
        .client
        .request::<i32>(HttpRequest::get("/v1/curriculum/progress").authenticated())
        .await;

    let later = h.transport.recorded_for("/v1/curriculum/progress");
    assert_eq!(later.len(), 1);
    assert_eq!(later[0].access_token, None);
}

#[tokio::test]
async fn test_unauthorized_after_retry_expires_session() {
    let h = harness(Some("old"), Some("r0"));
    h.transport
        .fail("/v1/member/profile", NetworkError::Unauthorized)
        .fail("/v1/member/profile", NetworkError::Unauthorized);
    h.transport.respond("/v1/auth/reissue", token_json("new", "r1"));

    let result = h
        .client
        .request::<i32>(HttpRequest::get("/v1/member/profile").authenticated())
        .await;

    assert_eq!(result, Err(NetworkError::Unauthorized));
    assert_eq!(h.transport.recorded_for("/v1/auth/reissue").len(), 1);
    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.access_token().is_none());
}

#[tokio::test]
async fn test_rotated_token_skips_reissue() {
    let h = harness(Some("rotated"), Some("r1"));

    h.sessions
        .reissue_after_unauthorized(Some("old"))
        .await
        .unwrap();

    assert!(h.transport.recorded_for("/v1/auth/reissue").is_empty());
    assert_eq!(h.sessions.state(), SessionState::LoggedIn);
}

#[tokio::test]
async fn test_unauthenticated_request_is_not_reissued() {
    let h = harness(Some("a"), Some("r"));
    h.transport.fail("/v1/open", NetworkError::Unauthorized);

    let result = h.client.execute(HttpRequest::get("/v1/open")).await;

    assert_eq!(result, Err(NetworkError::Unauthorized));
    assert!(h.transport.recorded_for("/v1/auth/reissue").is_empty());
    assert_eq!(h.sessions.state(), SessionState::LoggedIn);
}

// ============================================================================
// Launch check
// ============================================================================

#[tokio::test]
async fn test_check_session() {
    let h = harness(None, None);
    assert_eq!(h.sessions.check_session().await, TokenState::Empty);
    assert!(h.transport.recorded().is_empty());

    let h = harness(Some("a0"), Some("r0"));
    h.transport.respond("/v1/auth/reissue", token_json("a1", "r1"));
    assert_eq!(h.sessions.check_session().await, TokenState::Valid);
    assert_eq!(h.tokens.access_token().as_deref(), Some("a1"));

    let h = harness(Some("a0"), Some("r0"));
    h.transport.fail("/v1/auth/reissue", NetworkError::Server);
    assert_eq!(h.sessions.check_session().await, TokenState::Expired);
    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.refresh_token().is_none());
}

// ============================================================================
// Logout / resign
// ============================================================================

#[tokio::test]
async fn test_logout_clears_refresh_token() {
    let h = harness(Some("a"), Some("r"));
    h.transport.respond("/v1/auth/logout", json!("bye"));

    h.sessions.logout(h.member.clone()).await.unwrap();

    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.refresh_token().is_none());
    let sent = h.transport.recorded_for("/v1/auth/logout");
    assert_eq!(sent[0].access_token.as_deref(), Some("a"));
}

#[tokio::test]
async fn test_logout_server_error_keeps_session() {
    let h = harness(Some("a"), Some("r"));
    h.transport.fail("/v1/auth/logout", NetworkError::Server);

    let result = h.sessions.logout(h.member.clone()).await;

    assert_eq!(result, Err(AuthError::Network(NetworkError::Server)));
    assert_eq!(h.sessions.state(), SessionState::LoggedIn);
    assert_eq!(h.tokens.refresh_token().as_deref(), Some("r"));
}

#[tokio::test]
async fn test_logout_with_expired_session_still_logs_out() {
    let h = harness(Some("a"), Some("r"));
    h.transport
        .fail("/v1/auth/logout", NetworkError::Unauthorized)
        .fail("/v1/auth/reissue", NetworkError::client("401", "expired"));

    h.sessions.logout(h.member.clone()).await.unwrap();

    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert_eq!(h.transport.recorded_for("/v1/auth/reissue").len(), 1);
}

#[tokio::test]
async fn test_logout_after_expired_access_token_reissues_and_retries() {
    let h = harness(Some("a0"), Some("r0"));
    h.transport
        .fail("/v1/auth/logout", NetworkError::Unauthorized)
        .respond("/v1/auth/logout", json!("bye"))
        .respond("/v1/auth/reissue", token_json("a1", "r1"));

    h.sessions.logout(h.member.clone()).await.unwrap();

    let sent = h.transport.recorded_for("/v1/auth/logout");
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].access_token.as_deref(), Some("a1"));
    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.refresh_token().is_none());
}

#[tokio::test]
async fn test_resign_after_expired_access_token_reissues_and_retries() {
    let h = harness(Some("a0"), Some("r0"));
    h.transport
        .fail("/v1/member", NetworkError::Unauthorized)
        .respond("/v1/member", json!(null))
        .respond("/v1/auth/reissue", token_json("a1", "r1"));

    h.sessions.resign(h.member.clone()).await.unwrap();

    assert_eq!(h.transport.recorded_for("/v1/auth/reissue").len(), 1);
    let sent = h.transport.recorded_for("/v1/member");
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].access_token.as_deref(), Some("a0"));
    assert_eq!(sent[1].access_token.as_deref(), Some("a1"));
    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.refresh_token().is_none());
}

#[tokio::test]
async fn test_resign_deletes_member() {
    let h = harness(Some("a"), Some("r"));
    h.transport.respond("/v1/member", json!(null));

    h.sessions.resign(h.member.clone()).await.unwrap();

    let sent = h.transport.recorded_for("/v1/member");
    assert_eq!(sent[0].request.method.as_str(), "DELETE");
    assert_eq!(h.sessions.state(), SessionState::LoggedOut);
    assert!(h.tokens.refresh_token().is_none());
}
