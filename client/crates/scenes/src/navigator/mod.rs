//! Navigation Capabilities
//!
//! One minimal capability trait per screen. View models depend only on these,
//! so tests can substitute a recording double for the coordinator.
//!
//! [`ExpiredTokenNavigation`] is part of every screen that talks to the
//! backend; it always reaches the single root flow handler, whatever the
//! depth of the coordinator that owns the screen.

pub mod adaptor;

use auth::{TokenState, UserOnboardingModel};
use content::models::{ArticleCategory, ArticleId};

pub use adaptor::{
    ArticleCategoryAdaptor, ArticleDetailAdaptor, ArticleListByCategoryAdaptor, AuthAdaptor,
    BookmarkAdaptor, ChallengeAdaptor, CurriculumAdaptor, CurriculumListByWeekAdaptor,
    MyPageAdaptor, SplashAdaptor, TodayAdaptor,
};

// ============================================================================
// Shared capabilities
// ============================================================================

/// Report a session that could not be recovered
pub trait ExpiredTokenNavigation: Send + Sync {
    fn check_token_is_expired(&self);
}

/// Leave the current screen
pub trait PopNavigation: Send + Sync {
    fn back_button_tapped(&self);
}

/// Bookmark / my-page buttons of the main navigation bar
pub trait NavigationBarNavigation: Send + Sync {
    fn bookmark_button_tapped(&self);
    fn my_page_button_tapped(&self);
}

// ============================================================================
// Launch / auth
// ============================================================================

pub trait SplashNavigation: ExpiredTokenNavigation {
    fn check_token(&self, state: TokenState);
}

pub trait LoginNavigation: ExpiredTokenNavigation {
    fn login_completed(&self);
    /// The social account has no member yet
    fn login_failed(&self, kakao_access_token: String);
}

pub trait OnboardingNavigation: PopNavigation + ExpiredTokenNavigation {
    fn onboarding_completed(&self, model: UserOnboardingModel);
}

pub trait CompleteOnboardingNavigation: Send + Sync {
    fn start_button_tapped(&self);
}

/// Everything the auth flow's screens can ask for
pub trait EntireAuthNavigation:
    LoginNavigation + OnboardingNavigation + CompleteOnboardingNavigation
{
}

impl<T> EntireAuthNavigation for T where
    T: LoginNavigation + OnboardingNavigation + CompleteOnboardingNavigation
{
}

// ============================================================================
// Main tabs
// ============================================================================

pub trait TodayNavigation: NavigationBarNavigation + ExpiredTokenNavigation {
    fn today_article_tapped(&self, article_id: ArticleId);
}

pub trait ArticleCategoryNavigation: NavigationBarNavigation + ExpiredTokenNavigation {
    fn article_category_tapped(&self, category: ArticleCategory);
}

pub trait ArticleListByCategoryNavigation: PopNavigation + ExpiredTokenNavigation {
    fn article_tapped(&self, article_id: ArticleId);
}

pub trait CurriculumNavigation: NavigationBarNavigation + ExpiredTokenNavigation {
    fn article_list_by_week_tapped(&self, week: u8);
}

pub trait CurriculumListByWeekNavigation: PopNavigation + ExpiredTokenNavigation {
    fn article_tapped(&self, article_id: ArticleId);
}

pub trait ChallengeNavigation: NavigationBarNavigation + ExpiredTokenNavigation {}

// ============================================================================
// Shared features
// ============================================================================

pub trait ArticleDetailNavigation: ExpiredTokenNavigation {
    fn close_button_tapped(&self);
}

pub trait BookmarkNavigation: PopNavigation + ExpiredTokenNavigation {
    fn bookmark_cell_tapped(&self, article_id: ArticleId);
}

pub trait MyPageNavigation: PopNavigation + ExpiredTokenNavigation {
    fn logout_completed(&self);
    fn resign_completed(&self);
}
