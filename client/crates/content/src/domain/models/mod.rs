//! Models

pub mod article;
pub mod bookmark;
pub mod challenge;
pub mod curriculum;
pub mod my_page;

pub use article::{ArticleCategory, ArticleDetail, ArticleId, ArticleSummary, BlockType, TodayArticle};
pub use bookmark::BookmarkList;
pub use challenge::ChallengeData;
pub use curriculum::{ArticleDataByWeek, CurriculumWeek, UserInfoData};
pub use my_page::MyPageProfile;
