//! Screen Managers
//!
//! Each view model talks to exactly one manager, a narrow async façade over
//! the auth and content services. Errors are already in the kernel taxonomy
//! when they reach the view model.
//!
//! These traits are used as `Arc<dyn _>`, so they go through `async_trait`
//! rather than the `trait_variant` seams of the service layer.

pub mod live;

use async_trait::async_trait;
use auth::{OnboardingDraft, TokenState, UserOnboardingModel};
use content::models::{
    ArticleCategory, ArticleDetail, ArticleId, ArticleSummary, BookmarkList, ChallengeData,
    CurriculumWeek, MyPageProfile, TodayArticle, UserInfoData,
};
use kernel::NetworkResult;

pub use live::{LiveAuthManager, LiveContentManager, LiveMyPageManager};

// ============================================================================
// Session
// ============================================================================

/// Synchronous session controls for the root coordinator
pub trait SessionControl: Send + Sync {
    /// Drop every credential
    fn expire(&self);

    fn is_logged_in(&self) -> bool;
}

#[async_trait]
pub trait SplashManager: Send + Sync {
    /// Validate the stored session, reissuing if needed
    async fn check_token(&self) -> TokenState;
}

#[async_trait]
pub trait LoginManager: Send + Sync {
    async fn login(&self, kakao_access_token: &str) -> NetworkResult<()>;
}

#[async_trait]
pub trait OnboardingManager: Send + Sync {
    async fn sign_up(&self, draft: &OnboardingDraft) -> NetworkResult<UserOnboardingModel>;
}

// ============================================================================
// Content
// ============================================================================

#[async_trait]
pub trait TodayManager: Send + Sync {
    async fn today_article(&self) -> NetworkResult<TodayArticle>;
}

/// Bookmark toggling, shared by every screen that lists articles
#[async_trait]
pub trait BookmarkToggleManager: Send + Sync {
    async fn set_bookmark(&self, article_id: ArticleId, is_marked: bool) -> NetworkResult<()>;
}

#[async_trait]
pub trait ArticleListByCategoryManager: BookmarkToggleManager {
    async fn articles(&self, category: ArticleCategory) -> NetworkResult<Vec<ArticleSummary>>;
}

#[async_trait]
pub trait ArticleDetailManager: BookmarkToggleManager {
    async fn article_detail(&self, article_id: ArticleId) -> NetworkResult<ArticleDetail>;
}

#[async_trait]
pub trait CurriculumManager: Send + Sync {
    async fn progress(&self) -> NetworkResult<UserInfoData>;
}

#[async_trait]
pub trait CurriculumListManager: BookmarkToggleManager {
    async fn articles_by_week(&self, week: u8) -> NetworkResult<CurriculumWeek>;
}

#[async_trait]
pub trait BookmarkManager: BookmarkToggleManager {
    async fn bookmarks(&self) -> NetworkResult<BookmarkList>;
}

#[async_trait]
pub trait ChallengeManager: Send + Sync {
    /// `None` when the member has no progress yet
    async fn challenge_progress(&self) -> NetworkResult<Option<ChallengeData>>;
}

#[async_trait]
pub trait MyPageManager: Send + Sync {
    async fn profile(&self) -> NetworkResult<MyPageProfile>;

    async fn logout(&self) -> NetworkResult<()>;

    async fn resign(&self) -> NetworkResult<()>;
}
