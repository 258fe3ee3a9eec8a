//! Curriculum Models
//!
//! The curriculum walks through the 40 weeks of pregnancy with one article
//! per day.

use super::article::ArticleId;

/// Curriculum header: where the member currently is
#[derive(Debug, Clone, PartialEq)]
pub struct UserInfoData {
    pub baby_nickname: String,
    pub user_week: u8,
    pub user_day: u8,
    /// 0.0〜1.0
    pub progress: f32,
    pub remaining_day: u32,
}

impl UserInfoData {
    /// Progress as a whole percentage, clamped to 0〜100
    pub fn progress_percent(&self) -> u8 {
        (self.progress.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// One curriculum article row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDataByWeek {
    pub article_id: ArticleId,
    pub article_day: String,
    pub article_tags: String,
    pub article_read_time: String,
    pub article_date: String,
    pub article_title: String,
    pub article_content: String,
    pub article_image_url: String,
    pub is_marked: bool,
}

/// Articles of one curriculum week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumWeek {
    pub week: u8,
    pub baby_nickname: String,
    pub articles: Vec<ArticleDataByWeek>,
}

impl CurriculumWeek {
    pub const FIRST_WEEK: u8 = 1;
    pub const LAST_WEEK: u8 = 40;

    /// Previous week, if any
    pub fn previous_week(&self) -> Option<u8> {
        (self.week > Self::FIRST_WEEK).then(|| self.week - 1)
    }

    /// Next week, if any
    pub fn next_week(&self) -> Option<u8> {
        (self.week < Self::LAST_WEEK).then(|| self.week + 1)
    }
}
