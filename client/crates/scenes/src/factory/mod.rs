//! Scene Factories
//!
//! A factory turns a coordinator handle into a ready-to-show [`Screen`]: the
//! view model is wired to its manager and to an adaptor that forwards
//! navigation intents back to the coordinator.
//!
//! Coordinators depend on the composite [`SceneFactory`]; the live wiring is
//! in [`live`].

pub mod live;

use std::sync::Weak;

use auth::UserOnboardingModel;
use content::models::{ArticleCategory, ArticleId};

use crate::coordinator::{
    AppCoordinator, ArticleCategoryCoordinator, ArticleCoordinator, AuthCoordinator,
    BookmarkCoordinator, ChallengeCoordinator, CurriculumCoordinator, MyPageCoordinator,
    TodayCoordinator,
};
use crate::navigation::Screen;

pub use live::LiveSceneFactory;

pub trait SplashFactory: Send + Sync {
    fn make_splash(&self, coordinator: Weak<AppCoordinator>) -> Screen;
}

pub trait AuthFactory: Send + Sync {
    fn make_login(&self, coordinator: Weak<AuthCoordinator>) -> Screen;

    fn make_onboarding(
        &self,
        coordinator: Weak<AuthCoordinator>,
        kakao_access_token: String,
    ) -> Screen;

    fn make_complete_onboarding(
        &self,
        coordinator: Weak<AuthCoordinator>,
        model: UserOnboardingModel,
    ) -> Screen;
}

pub trait TodayFactory: Send + Sync {
    fn make_today(&self, coordinator: Weak<TodayCoordinator>) -> Screen;
}

pub trait ArticleCategoryFactory: Send + Sync {
    fn make_article_category(&self, coordinator: Weak<ArticleCategoryCoordinator>) -> Screen;

    fn make_article_list_by_category(
        &self,
        coordinator: Weak<ArticleCategoryCoordinator>,
        category: ArticleCategory,
    ) -> Screen;
}

pub trait CurriculumFactory: Send + Sync {
    fn make_curriculum(&self, coordinator: Weak<CurriculumCoordinator>) -> Screen;

    fn make_curriculum_list_by_week(
        &self,
        coordinator: Weak<CurriculumCoordinator>,
        week: u8,
    ) -> Screen;
}

pub trait ChallengeFactory: Send + Sync {
    fn make_challenge(&self, coordinator: Weak<ChallengeCoordinator>) -> Screen;
}

pub trait ArticleFactory: Send + Sync {
    fn make_article_detail(
        &self,
        coordinator: Weak<ArticleCoordinator>,
        article_id: ArticleId,
    ) -> Screen;
}

pub trait BookmarkFactory: Send + Sync {
    fn make_bookmark(&self, coordinator: Weak<BookmarkCoordinator>) -> Screen;
}

pub trait MyPageFactory: Send + Sync {
    fn make_my_page(&self, coordinator: Weak<MyPageCoordinator>) -> Screen;
}

/// Every feature factory
pub trait SceneFactory:
    SplashFactory
    + AuthFactory
    + TodayFactory
    + ArticleCategoryFactory
    + CurriculumFactory
    + ChallengeFactory
    + ArticleFactory
    + BookmarkFactory
    + MyPageFactory
{
}

impl<T> SceneFactory for T where
    T: SplashFactory
        + AuthFactory
        + TodayFactory
        + ArticleCategoryFactory
        + CurriculumFactory
        + ChallengeFactory
        + ArticleFactory
        + BookmarkFactory
        + MyPageFactory
{
}
