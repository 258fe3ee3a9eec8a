//! Navigation Host
//!
//! The render-agnostic stand-in for the platform's navigation containers.
//! Coordinators mutate [`NavigationController`] stacks; the host UI listens to
//! [`NavigationEvent`]s and renders the [`Screen`] values it finds there.

pub mod controller;
pub mod tab_bar;

use std::sync::Arc;

use kernel::id::ScreenId;

use crate::view_model::{
    ArticleCategoryViewModel, ArticleDetailViewModel, ArticleListByCategoryViewModel,
    BookmarkViewModel, ChallengeViewModel, CompleteOnboardingViewModel, CurriculumListByWeekViewModel,
    CurriculumViewModel, LoginViewModel, MyPageViewModel, OnboardingViewModel, SplashViewModel,
    TodayViewModel,
};

pub use controller::{NavigationController, NavigationEvent};
pub use tab_bar::{Tab, TabBarController};

/// One renderable screen
#[derive(Debug, Clone)]
pub struct Screen {
    pub id: ScreenId,
    pub scene: Scene,
}

impl Screen {
    pub fn new(scene: Scene) -> Self {
        Self {
            id: ScreenId::new(),
            scene,
        }
    }

    pub fn name(&self) -> &'static str {
        self.scene.name()
    }
}

/// Every screen the client can show, with its bound view model
#[derive(Debug, Clone)]
pub enum Scene {
    Splash(Arc<SplashViewModel>),
    Login(Arc<LoginViewModel>),
    Onboarding(Arc<OnboardingViewModel>),
    CompleteOnboarding(Arc<CompleteOnboardingViewModel>),
    TabBar(Arc<TabBarController>),
    Today(Arc<TodayViewModel>),
    ArticleCategory(Arc<ArticleCategoryViewModel>),
    ArticleListByCategory(Arc<ArticleListByCategoryViewModel>),
    ArticleDetail(Arc<ArticleDetailViewModel>),
    Curriculum(Arc<CurriculumViewModel>),
    CurriculumListByWeek(Arc<CurriculumListByWeekViewModel>),
    Bookmark(Arc<BookmarkViewModel>),
    Challenge(Arc<ChallengeViewModel>),
    MyPage(Arc<MyPageViewModel>),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Splash(_) => "splash",
            Self::Login(_) => "login",
            Self::Onboarding(_) => "onboarding",
            Self::CompleteOnboarding(_) => "complete_onboarding",
            Self::TabBar(_) => "tab_bar",
            Self::Today(_) => "today",
            Self::ArticleCategory(_) => "article_category",
            Self::ArticleListByCategory(_) => "article_list_by_category",
            Self::ArticleDetail(_) => "article_detail",
            Self::Curriculum(_) => "curriculum",
            Self::CurriculumListByWeek(_) => "curriculum_list_by_week",
            Self::Bookmark(_) => "bookmark",
            Self::Challenge(_) => "challenge",
            Self::MyPage(_) => "my_page",
        }
    }
}
