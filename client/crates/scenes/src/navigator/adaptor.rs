//! Navigator Adaptors
//!
//! One adaptor per screen. Each holds a weak handle to the coordinator that
//! owns the screen and translates capability calls into coordinator actions.
//! Once the coordinator is gone, calls are dropped.

use std::sync::Weak;

use auth::{TokenState, UserOnboardingModel};
use content::models::{ArticleCategory, ArticleId};

use super::{
    ArticleCategoryNavigation, ArticleDetailNavigation, ArticleListByCategoryNavigation,
    BookmarkNavigation, ChallengeNavigation, CompleteOnboardingNavigation,
    CurriculumListByWeekNavigation, CurriculumNavigation, ExpiredTokenNavigation,
    LoginNavigation, MyPageNavigation, NavigationBarNavigation, OnboardingNavigation,
    PopNavigation, SplashNavigation, TodayNavigation,
};
use crate::coordinator::{
    AppCoordinator, ArticleCategoryCoordinator, ArticleCoordinator, AuthCoordinator,
    BookmarkCoordinator, ChallengeCoordinator, Coordinator, CurriculumCoordinator,
    MyPageCoordinator, TodayCoordinator,
};

fn forward<C>(coordinator: &Weak<C>, action: &'static str, f: impl FnOnce(&C)) {
    match coordinator.upgrade() {
        Some(coordinator) => f(&coordinator),
        None => tracing::debug!(action, "Coordinator released; navigation dropped"),
    }
}

/// Declares an adaptor struct over `$coordinator` with the shared
/// expired-token capability
macro_rules! adaptor {
    ($(#[$meta:meta])* $name:ident => $coordinator:ty) => {
        $(#[$meta])*
        pub struct $name {
            coordinator: Weak<$coordinator>,
        }

        impl $name {
            pub fn new(coordinator: Weak<$coordinator>) -> Self {
                Self { coordinator }
            }
        }

        impl ExpiredTokenNavigation for $name {
            fn check_token_is_expired(&self) {
                forward(&self.coordinator, "check_token_is_expired", |c| {
                    c.exit_application()
                });
            }
        }
    };
}

/// Back button finishes or pops inside the owning flow
macro_rules! pop_navigation {
    ($name:ident) => {
        impl PopNavigation for $name {
            fn back_button_tapped(&self) {
                forward(&self.coordinator, "back_button_tapped", |c| c.pop());
            }
        }
    };
}

/// Bookmark / my-page buttons spawn the shared sub-flows
macro_rules! navigation_bar {
    ($name:ident) => {
        impl NavigationBarNavigation for $name {
            fn bookmark_button_tapped(&self) {
                forward(&self.coordinator, "bookmark_button_tapped", |c| {
                    c.show_bookmark()
                });
            }

            fn my_page_button_tapped(&self) {
                forward(&self.coordinator, "my_page_button_tapped", |c| {
                    c.show_my_page()
                });
            }
        }
    };
}

// ============================================================================
// Launch / auth
// ============================================================================

adaptor!(SplashAdaptor => AppCoordinator);

impl SplashNavigation for SplashAdaptor {
    fn check_token(&self, state: TokenState) {
        forward(&self.coordinator, "check_token", |c| c.check_token(state));
    }
}

adaptor!(
    /// Shared by the login, onboarding and completion screens
    AuthAdaptor => AuthCoordinator
);
pop_navigation!(AuthAdaptor);

impl LoginNavigation for AuthAdaptor {
    fn login_completed(&self) {
        forward(&self.coordinator, "login_completed", |c| c.complete());
    }

    fn login_failed(&self, kakao_access_token: String) {
        forward(&self.coordinator, "login_failed", |c| {
            c.show_onboarding(kakao_access_token)
        });
    }
}

impl OnboardingNavigation for AuthAdaptor {
    fn onboarding_completed(&self, model: UserOnboardingModel) {
        forward(&self.coordinator, "onboarding_completed", |c| {
            c.show_complete_onboarding(model)
        });
    }
}

impl CompleteOnboardingNavigation for AuthAdaptor {
    fn start_button_tapped(&self) {
        forward(&self.coordinator, "start_button_tapped", |c| c.complete());
    }
}

// ============================================================================
// Main tabs
// ============================================================================

adaptor!(TodayAdaptor => TodayCoordinator);
navigation_bar!(TodayAdaptor);

impl TodayNavigation for TodayAdaptor {
    fn today_article_tapped(&self, article_id: ArticleId) {
        forward(&self.coordinator, "today_article_tapped", |c| {
            c.show_article_detail(article_id)
        });
    }
}

adaptor!(ArticleCategoryAdaptor => ArticleCategoryCoordinator);
navigation_bar!(ArticleCategoryAdaptor);

impl ArticleCategoryNavigation for ArticleCategoryAdaptor {
    fn article_category_tapped(&self, category: ArticleCategory) {
        forward(&self.coordinator, "article_category_tapped", |c| {
            c.show_article_list_by_category(category)
        });
    }
}

adaptor!(ArticleListByCategoryAdaptor => ArticleCategoryCoordinator);
pop_navigation!(ArticleListByCategoryAdaptor);

impl ArticleListByCategoryNavigation for ArticleListByCategoryAdaptor {
    fn article_tapped(&self, article_id: ArticleId) {
        forward(&self.coordinator, "article_tapped", |c| {
            c.show_article_detail(article_id)
        });
    }
}

adaptor!(CurriculumAdaptor => CurriculumCoordinator);
navigation_bar!(CurriculumAdaptor);

impl CurriculumNavigation for CurriculumAdaptor {
    fn article_list_by_week_tapped(&self, week: u8) {
        forward(&self.coordinator, "article_list_by_week_tapped", |c| {
            c.show_curriculum_list_by_week(week)
        });
    }
}

adaptor!(CurriculumListByWeekAdaptor => CurriculumCoordinator);
pop_navigation!(CurriculumListByWeekAdaptor);

impl CurriculumListByWeekNavigation for CurriculumListByWeekAdaptor {
    fn article_tapped(&self, article_id: ArticleId) {
        forward(&self.coordinator, "article_tapped", |c| {
            c.show_article_detail(article_id)
        });
    }
}

adaptor!(ChallengeAdaptor => ChallengeCoordinator);
navigation_bar!(ChallengeAdaptor);

impl ChallengeNavigation for ChallengeAdaptor {}

// ============================================================================
// Shared features
// ============================================================================

adaptor!(ArticleDetailAdaptor => ArticleCoordinator);

impl ArticleDetailNavigation for ArticleDetailAdaptor {
    fn close_button_tapped(&self) {
        forward(&self.coordinator, "close_button_tapped", |c| c.finish());
    }
}

adaptor!(BookmarkAdaptor => BookmarkCoordinator);
pop_navigation!(BookmarkAdaptor);

impl BookmarkNavigation for BookmarkAdaptor {
    fn bookmark_cell_tapped(&self, article_id: ArticleId) {
        forward(&self.coordinator, "bookmark_cell_tapped", |c| {
            c.show_article_detail(article_id)
        });
    }
}

adaptor!(MyPageAdaptor => MyPageCoordinator);
pop_navigation!(MyPageAdaptor);

impl MyPageNavigation for MyPageAdaptor {
    fn logout_completed(&self) {
        forward(&self.coordinator, "logout_completed", |c| c.end_session());
    }

    fn resign_completed(&self) {
        forward(&self.coordinator, "resign_completed", |c| c.end_session());
    }
}
