//! Wire DTOs
//!
//! Response shapes of the content endpoints (camelCase) and their conversion
//! into domain models. Optional strings default to empty so a sparse payload
//! still renders.

use serde::{Deserialize, Serialize};

use crate::domain::models::{
    ArticleDataByWeek, ArticleDetail, ArticleId, ArticleSummary, BlockType, BookmarkList,
    ChallengeData, CurriculumWeek, MyPageProfile, TodayArticle, UserInfoData,
};

// ============================================================================
// Article
// ============================================================================

/// `GET /v1/article/today`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayArticleResponse {
    #[serde(default)]
    pub baby_nickname: String,
    pub week: u8,
    pub day: u8,
    pub article_id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub main_image_url: String,
    #[serde(default)]
    pub article_description: String,
    #[serde(default)]
    pub required_time: u32,
}

impl From<TodayArticleResponse> for TodayArticle {
    fn from(r: TodayArticleResponse) -> Self {
        Self {
            baby_nickname: r.baby_nickname,
            week: r.week,
            day: r.day,
            article_id: r.article_id,
            title: r.title,
            main_image_url: r.main_image_url,
            article_description: r.article_description,
            required_time: r.required_time,
        }
    }
}

/// Body block `{ type, content, caption }`
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleBlockResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl ArticleBlockResponse {
    /// Body block, or `None` for a kind this client does not render
    pub fn into_block(self) -> Option<BlockType> {
        let block = match self.kind.as_str() {
            "CHAPTER_TITLE" => BlockType::ChapterTitle { text: self.content },
            "BODY" => BlockType::Body { text: self.content },
            "GENERAL_TITLE" => BlockType::GeneralTitle { text: self.content },
            "IMAGE" => BlockType::Image {
                image_url: self.content,
                caption: self.caption.unwrap_or_default(),
            },
            other => {
                tracing::debug!(kind = other, "Skipping unknown article block");
                return None;
            }
        };
        Some(block)
    }
}

/// `GET /v1/article/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetailResponse {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub main_image_url: String,
    #[serde(default)]
    pub main_image_caption: String,
    #[serde(default)]
    pub editor_note: String,
    #[serde(default)]
    pub required_time: u32,
    #[serde(default)]
    pub is_marked: bool,
    #[serde(default)]
    pub contents: Vec<ArticleBlockResponse>,
}

impl ArticleDetailResponse {
    pub fn into_detail(self, id: ArticleId) -> ArticleDetail {
        ArticleDetail {
            id,
            title: self.title,
            author: self.author,
            main_image_url: self.main_image_url,
            main_image_caption: self.main_image_caption,
            editor_note: self.editor_note,
            required_time: self.required_time,
            is_marked: self.is_marked,
            contents: self
                .contents
                .into_iter()
                .filter_map(ArticleBlockResponse::into_block)
                .collect(),
        }
    }
}

/// List row shared by category lists and bookmarks
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummaryResponse {
    pub article_id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub main_image_url: String,
    #[serde(default)]
    pub first_body_content: String,
    #[serde(default)]
    pub required_time: u32,
    #[serde(default)]
    pub is_marked: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<ArticleSummaryResponse> for ArticleSummary {
    fn from(r: ArticleSummaryResponse) -> Self {
        Self {
            article_id: r.article_id,
            title: r.title,
            main_image_url: r.main_image_url,
            first_body_content: r.first_body_content,
            required_time: r.required_time,
            is_marked: r.is_marked,
            tags: r.tags,
        }
    }
}

/// `GET /v1/article?category=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    #[serde(default)]
    pub article_summaries: Vec<ArticleSummaryResponse>,
}

// ============================================================================
// Curriculum
// ============================================================================

/// `GET /v1/curriculum/progress`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumProgressResponse {
    #[serde(default)]
    pub baby_nickname: String,
    pub week: u8,
    pub day: u8,
    #[serde(default)]
    pub progress: f32,
    #[serde(default)]
    pub remaining_day: u32,
}

impl From<CurriculumProgressResponse> for UserInfoData {
    fn from(r: CurriculumProgressResponse) -> Self {
        Self {
            baby_nickname: r.baby_nickname,
            user_week: r.week,
            user_day: r.day,
            progress: r.progress,
            remaining_day: r.remaining_day,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekArticleResponse {
    pub article_id: ArticleId,
    #[serde(default)]
    pub day: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub required_time: u32,
    #[serde(default)]
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub first_body_content: String,
    #[serde(default)]
    pub main_image_url: String,
    #[serde(default)]
    pub is_marked: bool,
}

impl WeekArticleResponse {
    fn into_row(self, week: u8) -> ArticleDataByWeek {
        ArticleDataByWeek {
            article_id: self.article_id,
            article_day: format!("{week}주 {}일차", self.day),
            article_tags: self.tags.join(" · "),
            article_read_time: format!("{}분 읽기", self.required_time),
            article_date: self.date,
            article_title: self.title,
            article_content: self.first_body_content,
            article_image_url: self.main_image_url,
            is_marked: self.is_marked,
        }
    }
}

/// `GET /v1/curriculum/week/{week}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumWeekResponse {
    #[serde(default)]
    pub baby_nickname: String,
    #[serde(default)]
    pub article_data: Vec<WeekArticleResponse>,
}

impl CurriculumWeekResponse {
    pub fn into_week(self, week: u8) -> CurriculumWeek {
        CurriculumWeek {
            week,
            baby_nickname: self.baby_nickname,
            articles: self
                .article_data
                .into_iter()
                .map(|a| a.into_row(week))
                .collect(),
        }
    }
}

// ============================================================================
// Bookmark
// ============================================================================

/// `GET /v1/article/bookmarks`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkListResponse {
    #[serde(default)]
    pub baby_nickname: String,
    #[serde(default)]
    pub article_summaries: Vec<ArticleSummaryResponse>,
}

impl From<BookmarkListResponse> for BookmarkList {
    fn from(r: BookmarkListResponse) -> Self {
        Self {
            baby_nickname: r.baby_nickname,
            articles: r.article_summaries.into_iter().map(Into::into).collect(),
        }
    }
}

/// `POST /v1/article/bookmark`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRequest {
    pub article_id: ArticleId,
    pub bookmark_request_status: bool,
}

// ============================================================================
// Challenge / My page
// ============================================================================

/// `GET /v1/member/challenge-progress`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProgressResponse {
    #[serde(default)]
    pub baby_nickname: String,
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub attendances: Vec<String>,
}

impl From<ChallengeProgressResponse> for ChallengeData {
    fn from(r: ChallengeProgressResponse) -> Self {
        Self {
            baby_daddy_name: r.baby_nickname,
            how_long_day: r.day,
            daddy_level: r.level,
            daddy_attendances: r.attendances,
        }
    }
}

/// `GET /v1/member/profile`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPageProfileResponse {
    #[serde(default)]
    pub baby_nickname: String,
    #[serde(default)]
    pub badge_image: String,
    #[serde(default)]
    pub notification_status: bool,
}

impl From<MyPageProfileResponse> for MyPageProfile {
    fn from(r: MyPageProfileResponse) -> Self {
        Self {
            baby_nickname: r.baby_nickname,
            badge_image: r.badge_image,
            is_alarm: r.notification_status,
        }
    }
}
