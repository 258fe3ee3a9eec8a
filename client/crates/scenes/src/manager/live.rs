//! Live Managers
//!
//! Managers backed by the real session manager and the HTTP content
//! services. The content transport is expected to be the reissuing client.

use std::sync::Arc;

use async_trait::async_trait;
use auth::domain::AuthApi;
use auth::{HttpMemberApi, OnboardingDraft, SessionManager, TokenState, UserOnboardingModel};
use content::models::{
    ArticleCategory, ArticleDetail, ArticleId, ArticleSummary, BookmarkList, ChallengeData,
    CurriculumWeek, MyPageProfile, TodayArticle, UserInfoData,
};
use content::{
    ArticleService, BookmarkService, ChallengeService, CurriculumService, HttpArticleService,
    HttpBookmarkService, HttpChallengeService, HttpCurriculumService, HttpMyPageService,
    MyPageService,
};
use kernel::{NetworkError, NetworkResult};
use platform::Requestable;

use super::{
    ArticleDetailManager, ArticleListByCategoryManager, BookmarkManager, BookmarkToggleManager,
    ChallengeManager, CurriculumListManager, CurriculumManager, LoginManager, MyPageManager,
    OnboardingManager, SessionControl, SplashManager, TodayManager,
};

// ============================================================================
// Auth
// ============================================================================

/// Splash, login and onboarding screens plus the root session controls
pub struct LiveAuthManager<A>
where
    A: AuthApi,
{
    sessions: Arc<SessionManager<A>>,
}

impl<A> LiveAuthManager<A>
where
    A: AuthApi,
{
    pub fn new(sessions: Arc<SessionManager<A>>) -> Self {
        Self { sessions }
    }
}

impl<A> SessionControl for LiveAuthManager<A>
where
    A: AuthApi + Send + Sync + 'static,
{
    fn expire(&self) {
        if let Err(e) = self.sessions.expire() {
            e.log();
        }
    }

    fn is_logged_in(&self) -> bool {
        self.sessions.is_logged_in()
    }
}

#[async_trait]
impl<A> SplashManager for LiveAuthManager<A>
where
    A: AuthApi + Send + Sync + 'static,
{
    async fn check_token(&self) -> TokenState {
        self.sessions.check_session().await
    }
}

#[async_trait]
impl<A> LoginManager for LiveAuthManager<A>
where
    A: AuthApi + Send + Sync + 'static,
{
    async fn login(&self, kakao_access_token: &str) -> NetworkResult<()> {
        self.sessions
            .login(kakao_access_token)
            .await
            .map_err(NetworkError::from)
    }
}

#[async_trait]
impl<A> OnboardingManager for LiveAuthManager<A>
where
    A: AuthApi + Send + Sync + 'static,
{
    async fn sign_up(&self, draft: &OnboardingDraft) -> NetworkResult<UserOnboardingModel> {
        self.sessions
            .sign_up(draft)
            .await
            .map_err(NetworkError::from)
    }
}

// ============================================================================
// Content
// ============================================================================

/// Every content screen's manager over one transport
#[derive(Debug, Clone)]
pub struct LiveContentManager<C> {
    articles: HttpArticleService<C>,
    curriculum: HttpCurriculumService<C>,
    bookmarks: HttpBookmarkService<C>,
    challenge: HttpChallengeService<C>,
}

impl<C> LiveContentManager<C>
where
    C: Clone,
{
    pub fn new(client: C) -> Self {
        Self {
            articles: HttpArticleService::new(client.clone()),
            curriculum: HttpCurriculumService::new(client.clone()),
            bookmarks: HttpBookmarkService::new(client.clone()),
            challenge: HttpChallengeService::new(client),
        }
    }
}

#[async_trait]
impl<C> TodayManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn today_article(&self) -> NetworkResult<TodayArticle> {
        self.articles.today_article().await
    }
}

#[async_trait]
impl<C> BookmarkToggleManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn set_bookmark(&self, article_id: ArticleId, is_marked: bool) -> NetworkResult<()> {
        self.bookmarks.set_bookmark(article_id, is_marked).await
    }
}

#[async_trait]
impl<C> ArticleListByCategoryManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn articles(&self, category: ArticleCategory) -> NetworkResult<Vec<ArticleSummary>> {
        self.articles.articles_by_category(category).await
    }
}

#[async_trait]
impl<C> ArticleDetailManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn article_detail(&self, article_id: ArticleId) -> NetworkResult<ArticleDetail> {
        self.articles.article_detail(article_id).await
    }
}

#[async_trait]
impl<C> CurriculumManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn progress(&self) -> NetworkResult<UserInfoData> {
        self.curriculum.progress().await
    }
}

#[async_trait]
impl<C> CurriculumListManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn articles_by_week(&self, week: u8) -> NetworkResult<CurriculumWeek> {
        self.curriculum.articles_by_week(week).await
    }
}

#[async_trait]
impl<C> BookmarkManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn bookmarks(&self) -> NetworkResult<BookmarkList> {
        self.bookmarks.bookmarks().await
    }
}

#[async_trait]
impl<C> ChallengeManager for LiveContentManager<C>
where
    C: Requestable + Send + Sync + 'static,
{
    async fn challenge_progress(&self) -> NetworkResult<Option<ChallengeData>> {
        self.challenge.progress().await
    }
}

// ============================================================================
// My page
// ============================================================================

/// Profile from the content side, logout / resign from the session side
///
/// Logout and resign go through `client` so an expired access token is
/// reissued before the call is retried.
pub struct LiveMyPageManager<C, A>
where
    A: AuthApi,
{
    profile: HttpMyPageService<C>,
    member: Arc<HttpMemberApi<C>>,
    sessions: Arc<SessionManager<A>>,
}

impl<C, A> LiveMyPageManager<C, A>
where
    C: Clone,
    A: AuthApi,
{
    pub fn new(client: C, sessions: Arc<SessionManager<A>>) -> Self {
        Self {
            profile: HttpMyPageService::new(client.clone()),
            member: Arc::new(HttpMemberApi::new(client)),
            sessions,
        }
    }
}

#[async_trait]
impl<C, A> MyPageManager for LiveMyPageManager<C, A>
where
    C: Requestable + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    async fn profile(&self) -> NetworkResult<MyPageProfile> {
        self.profile.profile().await
    }

    async fn logout(&self) -> NetworkResult<()> {
        self.sessions
            .logout(self.member.clone())
            .await
            .map_err(NetworkError::from)
    }

    async fn resign(&self) -> NetworkResult<()> {
        self.sessions
            .resign(self.member.clone())
            .await
            .map_err(NetworkError::from)
    }
}
