//! Content Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Article, curriculum, bookmark, challenge and my-page models;
//!   service traits
//! - `infra/` - HTTP implementations over [`platform::Requestable`] and wire DTOs
//!
//! Every request is authenticated. Services are meant to run on top of
//! `auth::ReissuingClient`, so an expired access token is reissued before the
//! error ever reaches a caller.

pub mod domain;
pub mod infra;

// Re-exports for convenience
pub use domain::services::{
    ArticleService, BookmarkService, ChallengeService, CurriculumService, MyPageService,
};
pub use infra::http::{
    HttpArticleService, HttpBookmarkService, HttpChallengeService, HttpCurriculumService,
    HttpMyPageService,
};

// Re-export kernel error types for unified error handling
pub use kernel::{ErrorKind, NetworkError, NetworkResult};

pub mod models {
    pub use crate::domain::models::*;
}
