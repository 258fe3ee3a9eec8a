//! Live scene factory
//!
//! Builds every screen over one transport (normally the reissuing client) and
//! one session manager. All collaborators are resolved here; a returned
//! [`Screen`] is ready to show.

use std::sync::{Arc, Weak};

use auth::domain::AuthApi;
use auth::{SessionManager, UserOnboardingModel};
use content::models::{ArticleCategory, ArticleId};
use platform::Requestable;

use super::{
    ArticleCategoryFactory, ArticleFactory, AuthFactory, BookmarkFactory, ChallengeFactory,
    CurriculumFactory, MyPageFactory, SplashFactory, TodayFactory,
};
use crate::coordinator::{
    AppCoordinator, ArticleCategoryCoordinator, ArticleCoordinator, AuthCoordinator,
    BookmarkCoordinator, ChallengeCoordinator, CurriculumCoordinator, MyPageCoordinator,
    TodayCoordinator,
};
use crate::manager::{LiveAuthManager, LiveContentManager, LiveMyPageManager, SessionControl};
use crate::navigation::{Scene, Screen};
use crate::navigator::{
    ArticleCategoryAdaptor, ArticleDetailAdaptor, ArticleListByCategoryAdaptor, AuthAdaptor,
    BookmarkAdaptor, ChallengeAdaptor, CurriculumAdaptor, CurriculumListByWeekAdaptor,
    MyPageAdaptor, SplashAdaptor, TodayAdaptor,
};
use crate::view_model::{
    ArticleCategoryViewModel, ArticleDetailViewModel, ArticleListByCategoryViewModel,
    BookmarkViewModel, ChallengeViewModel, CompleteOnboardingViewModel,
    CurriculumListByWeekViewModel, CurriculumViewModel, LoginViewModel, MyPageViewModel,
    OnboardingViewModel, SplashViewModel, TodayViewModel,
};

pub struct LiveSceneFactory<C, A>
where
    A: AuthApi,
{
    auth: Arc<LiveAuthManager<A>>,
    content: Arc<LiveContentManager<C>>,
    my_page: Arc<LiveMyPageManager<C, A>>,
}

impl<C, A> LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    pub fn new(client: C, sessions: Arc<SessionManager<A>>) -> Self {
        Self {
            auth: Arc::new(LiveAuthManager::new(sessions.clone())),
            content: Arc::new(LiveContentManager::new(client.clone())),
            my_page: Arc::new(LiveMyPageManager::new(client, sessions)),
        }
    }

    /// Session controls for the root coordinator
    pub fn session_control(&self) -> Arc<dyn SessionControl> {
        self.auth.clone()
    }
}

impl<C, A> SplashFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_splash(&self, coordinator: Weak<AppCoordinator>) -> Screen {
        let view_model =
            SplashViewModel::new(Arc::new(SplashAdaptor::new(coordinator)), self.auth.clone());
        Screen::new(Scene::Splash(Arc::new(view_model)))
    }
}

impl<C, A> AuthFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_login(&self, coordinator: Weak<AuthCoordinator>) -> Screen {
        let view_model =
            LoginViewModel::new(Arc::new(AuthAdaptor::new(coordinator)), self.auth.clone());
        Screen::new(Scene::Login(Arc::new(view_model)))
    }

    fn make_onboarding(
        &self,
        coordinator: Weak<AuthCoordinator>,
        kakao_access_token: String,
    ) -> Screen {
        let view_model = OnboardingViewModel::new(
            Arc::new(AuthAdaptor::new(coordinator)),
            self.auth.clone(),
            kakao_access_token,
        );
        Screen::new(Scene::Onboarding(Arc::new(view_model)))
    }

    fn make_complete_onboarding(
        &self,
        coordinator: Weak<AuthCoordinator>,
        model: UserOnboardingModel,
    ) -> Screen {
        let view_model =
            CompleteOnboardingViewModel::new(Arc::new(AuthAdaptor::new(coordinator)), model);
        Screen::new(Scene::CompleteOnboarding(Arc::new(view_model)))
    }
}

impl<C, A> TodayFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_today(&self, coordinator: Weak<TodayCoordinator>) -> Screen {
        let view_model =
            TodayViewModel::new(Arc::new(TodayAdaptor::new(coordinator)), self.content.clone());
        Screen::new(Scene::Today(Arc::new(view_model)))
    }
}

impl<C, A> ArticleCategoryFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_article_category(&self, coordinator: Weak<ArticleCategoryCoordinator>) -> Screen {
        let view_model =
            ArticleCategoryViewModel::new(Arc::new(ArticleCategoryAdaptor::new(coordinator)));
        Screen::new(Scene::ArticleCategory(Arc::new(view_model)))
    }

    fn make_article_list_by_category(
        &self,
        coordinator: Weak<ArticleCategoryCoordinator>,
        category: ArticleCategory,
    ) -> Screen {
        let view_model = ArticleListByCategoryViewModel::new(
            Arc::new(ArticleListByCategoryAdaptor::new(coordinator)),
            self.content.clone(),
            category,
        );
        Screen::new(Scene::ArticleListByCategory(Arc::new(view_model)))
    }
}

impl<C, A> CurriculumFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_curriculum(&self, coordinator: Weak<CurriculumCoordinator>) -> Screen {
        let view_model = CurriculumViewModel::new(
            Arc::new(CurriculumAdaptor::new(coordinator)),
            self.content.clone(),
        );
        Screen::new(Scene::Curriculum(Arc::new(view_model)))
    }

    fn make_curriculum_list_by_week(
        &self,
        coordinator: Weak<CurriculumCoordinator>,
        week: u8,
    ) -> Screen {
        let view_model = CurriculumListByWeekViewModel::new(
            Arc::new(CurriculumListByWeekAdaptor::new(coordinator)),
            self.content.clone(),
            week,
        );
        Screen::new(Scene::CurriculumListByWeek(Arc::new(view_model)))
    }
}

impl<C, A> ChallengeFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_challenge(&self, coordinator: Weak<ChallengeCoordinator>) -> Screen {
        let view_model = ChallengeViewModel::new(
            Arc::new(ChallengeAdaptor::new(coordinator)),
            self.content.clone(),
        );
        Screen::new(Scene::Challenge(Arc::new(view_model)))
    }
}

impl<C, A> ArticleFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_article_detail(
        &self,
        coordinator: Weak<ArticleCoordinator>,
        article_id: ArticleId,
    ) -> Screen {
        let view_model = ArticleDetailViewModel::new(
            Arc::new(ArticleDetailAdaptor::new(coordinator)),
            self.content.clone(),
            article_id,
        );
        Screen::new(Scene::ArticleDetail(Arc::new(view_model)))
    }
}

impl<C, A> BookmarkFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_bookmark(&self, coordinator: Weak<BookmarkCoordinator>) -> Screen {
        let view_model = BookmarkViewModel::new(
            Arc::new(BookmarkAdaptor::new(coordinator)),
            self.content.clone(),
        );
        Screen::new(Scene::Bookmark(Arc::new(view_model)))
    }
}

impl<C, A> MyPageFactory for LiveSceneFactory<C, A>
where
    C: Requestable + Clone + Send + Sync + 'static,
    A: AuthApi + Send + Sync + 'static,
{
    fn make_my_page(&self, coordinator: Weak<MyPageCoordinator>) -> Screen {
        let view_model = MyPageViewModel::new(
            Arc::new(MyPageAdaptor::new(coordinator)),
            self.my_page.clone(),
        );
        Screen::new(Scene::MyPage(Arc::new(view_model)))
    }
}

impl<C, A> std::fmt::Debug for LiveSceneFactory<C, A>
where
    A: AuthApi,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSceneFactory").finish_non_exhaustive()
    }
}
