//! Domain Layer
//!
//! Screen-facing models and the service traits that produce them.

pub mod models;
pub mod services;

pub use services::{
    LocalArticleService, LocalBookmarkService, LocalChallengeService, LocalCurriculumService,
    LocalMyPageService,
};
