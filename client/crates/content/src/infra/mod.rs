//! Infrastructure Layer
//!
//! HTTP service implementations and wire DTOs.

pub mod dto;
pub mod http;

pub use http::{
    HttpArticleService, HttpBookmarkService, HttpChallengeService, HttpCurriculumService,
    HttpMyPageService,
};
