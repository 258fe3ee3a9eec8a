//! Coordinator tree tests over the live factory and the scripted transport
//!
//! Screens are driven the way the host UI drives them: take the view model
//! out of the shown screen, call `transform`, and send input events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use auth::{AuthConfig, HttpAuthApi, NetworkError, ReissuingClient, SessionManager};
use content::models::{ArticleCategory, ArticleId};
use kernel::id::CoordinatorId;
use platform::TokenStore;
use platform::network::ScriptedClient;
use scenes::coordinator::{ArticleCategoryCoordinator, TodayCoordinator};
use scenes::view_model::{
    ArticleCategoryInput, ArticleDetailInput, ArticleListByCategoryInput, BookmarkInput,
    CompleteOnboardingInput, LoginInput, MyPageInput, OnboardingFlow, OnboardingInput,
    SplashInput, TodayInput,
};
use scenes::{
    AppCoordinator, AppFlow, Coordinator, CoordinatorState, LiveSceneFactory,
    NavigationController, RootFlow, Scene, SceneFactory, Tab, ViewModel,
};
use serde_json::json;
use tokio::time::sleep;

type Api = HttpAuthApi<ScriptedClient>;
type Factory = LiveSceneFactory<ReissuingClient<ScriptedClient, Api>, Api>;

const QUIET: Duration = Duration::from_millis(100);

/// Take the view model out of a shown screen
macro_rules! expect_scene {
    ($screen:expr, $variant:ident) => {
        match $screen.map(|screen| screen.scene) {
            Some(Scene::$variant(inner)) => inner,
            other => panic!(
                "expected {}, found {:?}",
                stringify!($variant),
                other.map(|scene| scene.name())
            ),
        }
    };
}

async fn eventually(what: &str, condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {what}");
}

struct Harness {
    tokens: Arc<TokenStore>,
    transport: ScriptedClient,
    factory: Arc<Factory>,
}

impl Harness {
    fn new(access: Option<&str>, refresh: Option<&str>) -> Self {
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set_fcm_token("fcm-1").unwrap();
        tokens
            .store_pair(access.map(String::from), refresh.map(String::from))
            .unwrap();

        let transport = ScriptedClient::new(tokens.clone());
        let sessions = Arc::new(SessionManager::new(
            Arc::new(HttpAuthApi::new(transport.clone())),
            tokens.clone(),
            Arc::new(AuthConfig::default()),
        ));
        let client = ReissuingClient::new(transport.clone(), sessions.clone());

        Self {
            tokens,
            transport,
            factory: Arc::new(LiveSceneFactory::new(client, sessions)),
        }
    }

    fn scene_factory(&self) -> Arc<dyn SceneFactory> {
        self.factory.clone()
    }

    fn app(&self) -> (Arc<AppCoordinator>, Arc<NavigationController>) {
        let navigation = Arc::new(NavigationController::new("window"));
        let app = AppCoordinator::new(
            navigation.clone(),
            self.scene_factory(),
            self.factory.session_control(),
        );
        (app, navigation)
    }
}

fn token_json(access: &str, refresh: &str) -> serde_json::Value {
    json!({ "accessToken": access, "refreshToken": refresh })
}

/// Root flow that only counts what reaches it
#[derive(Default)]
struct CountingRoot {
    expired: AtomicUsize,
    established: AtomicUsize,
    ended: AtomicUsize,
}

impl RootFlow for CountingRoot {
    fn session_expired(&self) {
        self.expired.fetch_add(1, Ordering::SeqCst);
    }

    fn session_established(&self) {
        self.established.fetch_add(1, Ordering::SeqCst);
    }

    fn session_ended(&self) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}

fn root_handle(root: &Arc<CountingRoot>) -> Weak<dyn RootFlow> {
    let handle: Weak<CountingRoot> = Arc::downgrade(root);
    handle
}

/// Launch the app with a refresh token the backend accepts
async fn launch_into_main(h: &Harness) -> (Arc<AppCoordinator>, Arc<NavigationController>) {
    h.transport.respond("/v1/auth/reissue", token_json("a1", "r1"));
    let (app, navigation) = h.app();
    app.start();

    let splash = expect_scene!(navigation.top(), Splash);
    let input = SplashInput::default();
    let _output = splash.transform(input.clone());
    input.view_did_load.send(());

    eventually("main flow", || app.flow() == AppFlow::Main).await;
    (app, navigation)
}

// ============================================================================
// Tree bookkeeping
// ============================================================================

#[test]
fn test_children_track_spawned_minus_finished() {
    let h = Harness::new(Some("a1"), Some("r1"));
    let root = Arc::new(CountingRoot::default());
    let navigation = Arc::new(NavigationController::new("today"));
    let today = TodayCoordinator::new(navigation.clone(), h.scene_factory(), root_handle(&root));

    today.start();
    assert_eq!(today.state(), CoordinatorState::Started);
    assert_eq!(navigation.depth(), 1);

    today.show_bookmark();
    today.show_article_detail(ArticleId(3));
    assert_eq!(today.children().len(), 2);
    assert_eq!(navigation.depth(), 2);
    expect_scene!(navigation.presented(), ArticleDetail);

    let article = today.children()[1].clone();
    article.pop();
    assert_eq!(article.state(), CoordinatorState::Finished);
    assert!(navigation.presented().is_none());
    assert_eq!(today.children().len(), 1);

    let bookmark = today.children()[0].clone();
    bookmark.pop();
    assert_eq!(bookmark.state(), CoordinatorState::Finished);
    assert_eq!(navigation.depth(), 1);
    assert!(today.children().is_empty());

    // Finishing twice changes nothing
    bookmark.finish();
    assert!(today.children().is_empty());
    assert_eq!(navigation.depth(), 1);
    assert_eq!(root.expired.load(Ordering::SeqCst), 0);
}

#[test]
fn test_second_article_replaces_the_first() {
    let h = Harness::new(Some("a1"), Some("r1"));
    let root = Arc::new(CountingRoot::default());
    let navigation = Arc::new(NavigationController::new("today"));
    let today = TodayCoordinator::new(navigation.clone(), h.scene_factory(), root_handle(&root));
    today.start();

    today.show_article_detail(ArticleId(1));
    let first = today.children()[0].clone();
    today.show_article_detail(ArticleId(2));

    assert_eq!(first.state(), CoordinatorState::Finished);
    assert_eq!(today.children().len(), 1);
    let shown = expect_scene!(navigation.presented(), ArticleDetail);
    assert_eq!(shown.article_id(), ArticleId(2));

    today.children()[0].clone().pop();
    assert!(today.children().is_empty());
    assert!(navigation.presented().is_none());
}

#[test]
fn test_unknown_child_finished_is_ignored() {
    let h = Harness::new(Some("a1"), Some("r1"));
    let root = Arc::new(CountingRoot::default());
    let navigation = Arc::new(NavigationController::new("today"));
    let today = TodayCoordinator::new(navigation.clone(), h.scene_factory(), root_handle(&root));
    today.start();
    today.show_bookmark();

    today.child_finished(CoordinatorId::new());

    assert_eq!(today.children().len(), 1);
    assert_eq!(today.state(), CoordinatorState::Started);
    assert_eq!(navigation.depth(), 2);
}

#[test]
fn test_start_runs_once() {
    let h = Harness::new(Some("a1"), Some("r1"));
    let root = Arc::new(CountingRoot::default());
    let navigation = Arc::new(NavigationController::new("today"));
    let today = TodayCoordinator::new(navigation.clone(), h.scene_factory(), root_handle(&root));

    today.start();
    today.start();

    assert_eq!(navigation.depth(), 1);
}

// ============================================================================
// Navigation inside a tab
// ============================================================================

#[tokio::test]
async fn test_category_list_pushes_and_pops_inside_tab() {
    let h = Harness::new(Some("a1"), Some("r1"));
    let root = Arc::new(CountingRoot::default());
    let navigation = Arc::new(NavigationController::new("article_category"));
    let coordinator =
        ArticleCategoryCoordinator::new(navigation.clone(), h.scene_factory(), root_handle(&root));
    coordinator.start();

    let category = expect_scene!(navigation.top(), ArticleCategory);
    let input = ArticleCategoryInput::default();
    let _output = category.transform(input.clone());
    input.category_tapped.send(ArticleCategory::Finance);
    eventually("list pushed", || navigation.depth() == 2).await;

    let list = expect_scene!(navigation.top(), ArticleListByCategory);
    let input = ArticleListByCategoryInput::default();
    let output = list.transform(input.clone());
    assert_eq!(output.category, ArticleCategory::Finance);
    input.back_button_tapped.send(());
    eventually("list popped", || navigation.depth() == 1).await;

    assert!(coordinator.children().is_empty());
    assert_eq!(coordinator.state(), CoordinatorState::Started);
}

// ============================================================================
// Session expiry
// ============================================================================

#[tokio::test]
async fn test_expired_token_deep_in_tree_reaches_root_once() {
    let h = Harness::new(Some("a1"), Some("r1"));
    let root = Arc::new(CountingRoot::default());
    let navigation = Arc::new(NavigationController::new("today"));
    let today = TodayCoordinator::new(navigation.clone(), h.scene_factory(), root_handle(&root));
    today.start();

    // Today -> Bookmark
    let today_screen = expect_scene!(navigation.top(), Today);
    let today_input = TodayInput::default();
    let _today_output = today_screen.transform(today_input.clone());
    today_input.navigation_left_button_tapped.send(());
    eventually("bookmark flow", || today.children().len() == 1).await;
    let bookmark = today.children()[0].clone();

    // Bookmark -> Article
    let bookmark_screen = expect_scene!(navigation.top(), Bookmark);
    let bookmark_input = BookmarkInput::default();
    let _bookmark_output = bookmark_screen.transform(bookmark_input.clone());
    bookmark_input.bookmark_cell_tapped.send(ArticleId(7));
    eventually("article flow", || bookmark.children().len() == 1).await;

    // Article request is rejected and so is the reissue
    h.transport.fail("/v1/article/7", NetworkError::Unauthorized);
    h.transport.fail("/v1/auth/reissue", NetworkError::client("401", "expired"));
    let article_screen = expect_scene!(navigation.presented(), ArticleDetail);
    let article_input = ArticleDetailInput::default();
    let article_output = article_screen.transform(article_input.clone());
    let mut errors = article_output.error.subscribe();
    article_input.view_will_appear.send(());

    eventually("session expiry", || root.expired.load(Ordering::SeqCst) == 1).await;
    sleep(QUIET).await;
    assert_eq!(root.expired.load(Ordering::SeqCst), 1);
    assert_eq!(h.transport.recorded_for("/v1/auth/reissue").len(), 1);
    assert_eq!(h.tokens.refresh_token(), None);
    assert!(
        tokio::time::timeout(QUIET, futures::StreamExt::next(&mut errors))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_expired_session_in_main_flow_returns_to_login() {
    let h = Harness::new(Some("a0"), Some("r0"));
    let (app, navigation) = launch_into_main(&h).await;

    let tab_bar = expect_scene!(navigation.top(), TabBar);
    assert_eq!(app.children()[0].children().len(), Tab::ALL.len());

    // The only scripted reissue was spent on launch
    h.transport.fail("/v1/article/today", NetworkError::Unauthorized);
    let today = expect_scene!(tab_bar.navigation(Tab::Today).top(), Today);
    let input = TodayInput::default();
    let _output = today.transform(input.clone());
    input.view_will_appear.send(());

    eventually("auth flow", || app.flow() == AppFlow::Auth).await;
    expect_scene!(navigation.top(), Login);
    assert_eq!(app.children().len(), 1);
    assert_eq!(app.children()[0].name(), "auth");
    assert!(!h.tokens.is_logged_in());
}

// ============================================================================
// App flows
// ============================================================================

#[tokio::test]
async fn test_launch_without_tokens_shows_login() {
    let h = Harness::new(None, None);
    let (app, navigation) = h.app();
    app.start();
    assert_eq!(app.flow(), AppFlow::Launch);

    let splash = expect_scene!(navigation.top(), Splash);
    let input = SplashInput::default();
    let _output = splash.transform(input.clone());
    input.view_did_load.send(());

    eventually("auth flow", || app.flow() == AppFlow::Auth).await;
    expect_scene!(navigation.top(), Login);
    assert!(h.transport.recorded().is_empty());
}

#[tokio::test]
async fn test_unregistered_member_signs_up_into_main() {
    let h = Harness::new(None, None);
    let (app, navigation) = h.app();
    app.start();
    let splash = expect_scene!(navigation.top(), Splash);
    let input = SplashInput::default();
    let _output = splash.transform(input.clone());
    input.view_did_load.send(());
    eventually("auth flow", || app.flow() == AppFlow::Auth).await;

    // Login is not scripted, so the backend answers 404
    let login = expect_scene!(navigation.top(), Login);
    let input = LoginInput::default();
    let _output = login.transform(input.clone());
    input.kakao_login_succeeded.send("kakao-1".into());
    eventually("onboarding", || navigation.depth() == 2).await;

    h.transport.respond("/v1/auth/signup", token_json("a1", "r1"));
    let onboarding = expect_scene!(navigation.top(), Onboarding);
    let input = OnboardingInput::default();
    let output = onboarding.transform(input.clone());
    let mut pregnancy_enabled = output.pregnancy_button_enabled.subscribe();
    let mut fetal_enabled = output.fetal_button_enabled.subscribe();
    let mut flow = output.onboarding_flow.subscribe();
    input.pregnancy_weeks.send("20".into());
    assert_eq!(futures::StreamExt::next(&mut pregnancy_enabled).await, Some(true));
    input.next_button_tapped.send(());
    assert_eq!(
        futures::StreamExt::next(&mut flow).await,
        Some(OnboardingFlow::ToFetalNickname)
    );
    input.fetal_nickname.send("콩콩이".into());
    assert_eq!(futures::StreamExt::next(&mut fetal_enabled).await, Some(true));
    input.next_button_tapped.send(());
    eventually("complete onboarding", || navigation.depth() == 3).await;

    let complete = expect_scene!(navigation.top(), CompleteOnboarding);
    let input = CompleteOnboardingInput::default();
    let _output = complete.transform(input.clone());
    input.start_button_tapped.send(());

    eventually("main flow", || app.flow() == AppFlow::Main).await;
    expect_scene!(navigation.top(), TabBar);
    assert_eq!(navigation.depth(), 1);
    assert_eq!(app.children().len(), 1);
    assert_eq!(app.children()[0].name(), "tabbar");
    assert_eq!(h.tokens.access_token().as_deref(), Some("a1"));

    let sent = h.transport.recorded_for("/v1/auth/signup");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].request.body.as_ref().and_then(|body| body["token"].as_str()),
        Some("kakao-1")
    );
}

#[tokio::test]
async fn test_logout_from_my_page_returns_to_login() {
    let h = Harness::new(Some("a0"), Some("r0"));
    let (app, navigation) = launch_into_main(&h).await;
    let tab_bar = expect_scene!(navigation.top(), TabBar);
    let today_navigation = tab_bar.navigation(Tab::Today).clone();

    let today = expect_scene!(today_navigation.top(), Today);
    let input = TodayInput::default();
    let _output = today.transform(input.clone());
    input.navigation_right_button_tapped.send(());
    eventually("my page", || today_navigation.depth() == 2).await;

    h.transport.respond("/v1/auth/logout", json!(null));
    let my_page = expect_scene!(today_navigation.top(), MyPage);
    let input = MyPageInput::default();
    let _output = my_page.transform(input.clone());
    input.logout_tapped.send(());

    eventually("auth flow", || app.flow() == AppFlow::Auth).await;
    expect_scene!(navigation.top(), Login);
    assert_eq!(h.tokens.refresh_token(), None);
    assert_eq!(h.transport.recorded_for("/v1/auth/logout").len(), 1);
}
