//! HTTP Services
//!
//! Service implementations over any [`Requestable`]. In the running client the
//! transport is `auth::ReissuingClient`.

use kernel::{NetworkResult, OptionExt};
use platform::{HttpRequest, Requestable};

use crate::domain::models::{
    ArticleCategory, ArticleDetail, ArticleId, ArticleSummary, BookmarkList, ChallengeData,
    CurriculumWeek, MyPageProfile, TodayArticle, UserInfoData,
};
use crate::domain::services::{
    ArticleService, BookmarkService, ChallengeService, CurriculumService, MyPageService,
};
use crate::infra::dto::{
    ArticleDetailResponse, ArticleListResponse, BookmarkListResponse, BookmarkRequest,
    ChallengeProgressResponse, CurriculumProgressResponse, CurriculumWeekResponse,
    MyPageProfileResponse, TodayArticleResponse,
};

// ============================================================================
// Article
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpArticleService<C> {
    client: C,
}

impl<C> HttpArticleService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C> ArticleService for HttpArticleService<C>
where
    C: Requestable + Sync,
{
    async fn today_article(&self) -> NetworkResult<TodayArticle> {
        let request = HttpRequest::get("/v1/article/today").authenticated();
        let response = self
            .client
            .request::<TodayArticleResponse>(request)
            .await?
            .ok_or_bad_casting()?;
        tracing::debug!(article_id = %response.article_id, "Today article fetched");
        Ok(response.into())
    }

    async fn article_detail(&self, article_id: ArticleId) -> NetworkResult<ArticleDetail> {
        let request = HttpRequest::get(format!("/v1/article/{article_id}")).authenticated();
        let response = self
            .client
            .request::<ArticleDetailResponse>(request)
            .await?
            .ok_or_bad_casting()?;
        tracing::debug!(article_id = %article_id, blocks = response.contents.len(), "Article detail fetched");
        Ok(response.into_detail(article_id))
    }

    async fn articles_by_category(
        &self,
        category: ArticleCategory,
    ) -> NetworkResult<Vec<ArticleSummary>> {
        let request =
            HttpRequest::get(format!("/v1/article?category={}", category.key())).authenticated();
        let response = self.client.request::<ArticleListResponse>(request).await?;
        Ok(response
            .map(|r| r.article_summaries.into_iter().map(Into::into).collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// Curriculum
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpCurriculumService<C> {
    client: C,
}

impl<C> HttpCurriculumService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C> CurriculumService for HttpCurriculumService<C>
where
    C: Requestable + Sync,
{
    async fn progress(&self) -> NetworkResult<UserInfoData> {
        let request = HttpRequest::get("/v1/curriculum/progress").authenticated();
        let response = self
            .client
            .request::<CurriculumProgressResponse>(request)
            .await?
            .ok_or_bad_casting()?;
        Ok(response.into())
    }

    async fn articles_by_week(&self, week: u8) -> NetworkResult<CurriculumWeek> {
        let request = HttpRequest::get(format!("/v1/curriculum/week/{week}")).authenticated();
        let response = self
            .client
            .request::<CurriculumWeekResponse>(request)
            .await?
            .ok_or_bad_casting()?;
        Ok(response.into_week(week))
    }
}

// ============================================================================
// Bookmark
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpBookmarkService<C> {
    client: C,
}

impl<C> HttpBookmarkService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C> BookmarkService for HttpBookmarkService<C>
where
    C: Requestable + Sync,
{
    async fn bookmarks(&self) -> NetworkResult<BookmarkList> {
        let request = HttpRequest::get("/v1/article/bookmarks").authenticated();
        let response = self.client.request::<BookmarkListResponse>(request).await?;
        Ok(response.map(Into::into).unwrap_or_default())
    }

    async fn set_bookmark(&self, article_id: ArticleId, is_marked: bool) -> NetworkResult<()> {
        let request = HttpRequest::post("/v1/article/bookmark")
            .with_body(&BookmarkRequest {
                article_id,
                bookmark_request_status: is_marked,
            })?
            .authenticated();
        self.client.execute(request).await?;
        tracing::debug!(article_id = %article_id, is_marked, "Bookmark updated");
        Ok(())
    }
}

// ============================================================================
// Challenge
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpChallengeService<C> {
    client: C,
}

impl<C> HttpChallengeService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C> ChallengeService for HttpChallengeService<C>
where
    C: Requestable + Sync,
{
    async fn progress(&self) -> NetworkResult<Option<ChallengeData>> {
        let request = HttpRequest::get("/v1/member/challenge-progress").authenticated();
        let response = self
            .client
            .request::<ChallengeProgressResponse>(request)
            .await?;
        Ok(response.map(Into::into))
    }
}

// ============================================================================
// My page
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpMyPageService<C> {
    client: C,
}

impl<C> HttpMyPageService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C> MyPageService for HttpMyPageService<C>
where
    C: Requestable + Sync,
{
    async fn profile(&self) -> NetworkResult<MyPageProfile> {
        let request = HttpRequest::get("/v1/member/profile").authenticated();
        let response = self
            .client
            .request::<MyPageProfileResponse>(request)
            .await?
            .ok_or_bad_casting()?;
        Ok(response.into())
    }
}
