//! Service Traits
//!
//! Remote data sources for the feature screens. Implementations live in the
//! infrastructure layer.

use kernel::NetworkResult;

use crate::domain::models::{
    ArticleCategory, ArticleDetail, ArticleId, ArticleSummary, BookmarkList, ChallengeData,
    CurriculumWeek, MyPageProfile, TodayArticle, UserInfoData,
};

/// Article service
#[trait_variant::make(ArticleService: Send)]
pub trait LocalArticleService {
    /// Today's article for the member's current week and day
    async fn today_article(&self) -> NetworkResult<TodayArticle>;

    async fn article_detail(&self, article_id: ArticleId) -> NetworkResult<ArticleDetail>;

    async fn articles_by_category(
        &self,
        category: ArticleCategory,
    ) -> NetworkResult<Vec<ArticleSummary>>;
}

/// Curriculum service
#[trait_variant::make(CurriculumService: Send)]
pub trait LocalCurriculumService {
    async fn progress(&self) -> NetworkResult<UserInfoData>;

    async fn articles_by_week(&self, week: u8) -> NetworkResult<CurriculumWeek>;
}

/// Bookmark service
#[trait_variant::make(BookmarkService: Send)]
pub trait LocalBookmarkService {
    async fn bookmarks(&self) -> NetworkResult<BookmarkList>;

    /// Set the bookmark flag of an article
    async fn set_bookmark(&self, article_id: ArticleId, is_marked: bool) -> NetworkResult<()>;
}

/// Challenge service
#[trait_variant::make(ChallengeService: Send)]
pub trait LocalChallengeService {
    /// `None` when the backend has no progress yet
    async fn progress(&self) -> NetworkResult<Option<ChallengeData>>;
}

/// My page service
#[trait_variant::make(MyPageService: Send)]
pub trait LocalMyPageService {
    async fn profile(&self) -> NetworkResult<MyPageProfile>;
}
