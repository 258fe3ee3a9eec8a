//! View model behaviour against recording navigators and stub managers

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use auth::{OnboardingDraft, UserOnboardingModel};
use content::models::{
    ArticleDataByWeek, ArticleId, ArticleSummary, BookmarkList, ChallengeData, CurriculumWeek,
};
use futures::StreamExt;
use futures::stream::BoxStream;
use kernel::{NetworkError, NetworkResult};
use parking_lot::Mutex;
use scenes::manager::{
    BookmarkManager, BookmarkToggleManager, ChallengeManager, CurriculumListManager, LoginManager,
    OnboardingManager,
};
use scenes::navigator::{
    BookmarkNavigation, ChallengeNavigation, CurriculumListByWeekNavigation,
    ExpiredTokenNavigation, LoginNavigation, NavigationBarNavigation, OnboardingNavigation,
    PopNavigation,
};
use scenes::view_model::{
    BookmarkInput, BookmarkViewModel, ChallengeInput, ChallengeViewModel,
    CurriculumListByWeekInput, CurriculumListByWeekViewModel, LoginInput, LoginViewModel,
    OnboardingFlow, OnboardingInput, OnboardingPage, OnboardingViewModel,
};
use scenes::{NavigationFlow, ViewModel};
use tokio::sync::Notify;
use tokio::time::{sleep, timeout};

const WAIT: Duration = Duration::from_secs(1);
const QUIET: Duration = Duration::from_millis(100);

async fn next<T>(stream: &mut BoxStream<'static, T>) -> T {
    timeout(WAIT, stream.next())
        .await
        .expect("stream stayed silent")
        .expect("stream ended")
}

async fn assert_silent<T: std::fmt::Debug>(stream: &mut BoxStream<'static, T>) {
    if let Ok(value) = timeout(QUIET, stream.next()).await {
        panic!("unexpected emission: {value:?}");
    }
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

// ============================================================================
// Doubles
// ============================================================================

#[derive(Default)]
struct RecordingNavigator {
    events: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn record(&self, event: impl Into<String>) {
        self.events.lock().push(event.into());
    }

    fn count(&self, event: &str) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

impl ExpiredTokenNavigation for RecordingNavigator {
    fn check_token_is_expired(&self) {
        self.record("expired");
    }
}

impl PopNavigation for RecordingNavigator {
    fn back_button_tapped(&self) {
        self.record("back");
    }
}

impl NavigationBarNavigation for RecordingNavigator {
    fn bookmark_button_tapped(&self) {
        self.record("bookmark");
    }

    fn my_page_button_tapped(&self) {
        self.record("my_page");
    }
}

impl ChallengeNavigation for RecordingNavigator {}

impl LoginNavigation for RecordingNavigator {
    fn login_completed(&self) {
        self.record("login_completed");
    }

    fn login_failed(&self, kakao_access_token: String) {
        self.record(format!("login_failed:{kakao_access_token}"));
    }
}

impl OnboardingNavigation for RecordingNavigator {
    fn onboarding_completed(&self, model: UserOnboardingModel) {
        self.record(format!("onboarding_completed:{}", model.fetal_nickname.as_str()));
    }
}

impl CurriculumListByWeekNavigation for RecordingNavigator {
    fn article_tapped(&self, article_id: ArticleId) {
        self.record(format!("article:{article_id}"));
    }
}

impl BookmarkNavigation for RecordingNavigator {
    fn bookmark_cell_tapped(&self, article_id: ArticleId) {
        self.record(format!("bookmark_cell:{article_id}"));
    }
}

struct StubChallenge(NetworkResult<Option<ChallengeData>>);

#[async_trait]
impl ChallengeManager for StubChallenge {
    async fn challenge_progress(&self) -> NetworkResult<Option<ChallengeData>> {
        self.0.clone()
    }
}

/// Login that blocks until released
struct GatedLogin {
    calls: AtomicUsize,
    gate: Notify,
    result: NetworkResult<()>,
}

impl GatedLogin {
    fn new(result: NetworkResult<()>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
            result,
        }
    }
}

#[async_trait]
impl LoginManager for GatedLogin {
    async fn login(&self, _kakao_access_token: &str) -> NetworkResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        self.result.clone()
    }
}

#[derive(Default)]
struct FinalizingOnboarding {
    calls: AtomicUsize,
}

#[async_trait]
impl OnboardingManager for FinalizingOnboarding {
    async fn sign_up(&self, draft: &OnboardingDraft) -> NetworkResult<UserOnboardingModel> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        draft.finalize()
    }
}

fn summary(id: i64) -> ArticleSummary {
    ArticleSummary {
        article_id: ArticleId(id),
        title: format!("article {id}"),
        main_image_url: String::new(),
        first_body_content: String::new(),
        required_time: 3,
        is_marked: true,
        tags: vec![],
    }
}

/// Curriculum and bookmark content with an optional scripted failure
#[derive(Default)]
struct StubContent {
    weeks_requested: Mutex<Vec<u8>>,
    bookmark_calls: Mutex<Vec<(ArticleId, bool)>>,
    failure: Mutex<Option<NetworkError>>,
}

impl StubContent {
    fn failing(error: NetworkError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    fn check(&self) -> NetworkResult<()> {
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookmarkToggleManager for StubContent {
    async fn set_bookmark(&self, article_id: ArticleId, is_marked: bool) -> NetworkResult<()> {
        self.check()?;
        self.bookmark_calls.lock().push((article_id, is_marked));
        Ok(())
    }
}

#[async_trait]
impl CurriculumListManager for StubContent {
    async fn articles_by_week(&self, week: u8) -> NetworkResult<CurriculumWeek> {
        self.check()?;
        self.weeks_requested.lock().push(week);
        Ok(CurriculumWeek {
            week,
            baby_nickname: "콩콩이".into(),
            articles: vec![ArticleDataByWeek {
                article_id: ArticleId(i64::from(week) * 10),
                article_day: format!("{week}주 1일차"),
                article_tags: String::new(),
                article_read_time: "3분 읽기".into(),
                article_date: String::new(),
                article_title: "title".into(),
                article_content: String::new(),
                article_image_url: String::new(),
                is_marked: false,
            }],
        })
    }
}

#[async_trait]
impl BookmarkManager for StubContent {
    async fn bookmarks(&self) -> NetworkResult<BookmarkList> {
        self.check()?;
        Ok(BookmarkList {
            baby_nickname: "콩콩이".into(),
            articles: vec![summary(1), summary(2)],
        })
    }
}

// ============================================================================
// Challenge
// ============================================================================

fn challenge(result: NetworkResult<Option<ChallengeData>>) -> (ChallengeViewModel, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let view_model = ChallengeViewModel::new(navigator.clone(), Arc::new(StubChallenge(result)));
    (view_model, navigator)
}

#[tokio::test]
async fn test_challenge_projects_progress() {
    let progress = ChallengeData {
        baby_daddy_name: "test".into(),
        how_long_day: 12,
        daddy_level: "LEVEL_ONE".into(),
        daddy_attendances: vec![],
    };
    let (view_model, _) = challenge(Ok(Some(progress.clone())));
    let input = ChallengeInput::default();
    let output = view_model.transform(input.clone());
    let mut data = output.challenge_data.subscribe();

    input.view_will_appear.send(());

    assert_eq!(next(&mut data).await, progress);
}

#[tokio::test]
async fn test_challenge_without_progress_is_empty() {
    let (view_model, _) = challenge(Ok(None));
    let input = ChallengeInput::default();
    let output = view_model.transform(input.clone());
    let mut data = output.challenge_data.subscribe();

    input.view_will_appear.send(());

    assert_eq!(next(&mut data).await, ChallengeData::empty());
}

#[tokio::test]
async fn test_challenge_left_tap_emits_bookmark_flow_once_per_tap() {
    let (view_model, navigator) = challenge(Ok(None));
    let input = ChallengeInput::default();
    let output = view_model.transform(input.clone());
    let mut flow = output.navigation_flow.subscribe();

    input.navigation_left_button_tapped.send(());
    assert_eq!(next(&mut flow).await, NavigationFlow::BookmarkButtonTapped);
    assert_silent(&mut flow).await;

    input.navigation_left_button_tapped.send(());
    assert_eq!(next(&mut flow).await, NavigationFlow::BookmarkButtonTapped);
    input.navigation_right_button_tapped.send(());
    assert_eq!(next(&mut flow).await, NavigationFlow::MyPageButtonTapped);

    eventually("navigator calls", || navigator.events().len() == 3).await;
    assert_eq!(navigator.count("bookmark"), 2);
    assert_eq!(navigator.count("my_page"), 1);
}

#[tokio::test]
async fn test_second_transform_does_not_rebind() {
    let (view_model, navigator) = challenge(Ok(None));
    let input = ChallengeInput::default();
    let _first = view_model.transform(input.clone());
    let _second = view_model.transform(input.clone());

    input.navigation_left_button_tapped.send(());

    eventually("bookmark tap", || navigator.count("bookmark") == 1).await;
    sleep(QUIET).await;
    assert_eq!(navigator.count("bookmark"), 1);
}

#[tokio::test]
async fn test_unauthorized_goes_to_navigator_not_error_output() {
    let (view_model, navigator) = challenge(Err(NetworkError::Unauthorized));
    let input = ChallengeInput::default();
    let output = view_model.transform(input.clone());
    let mut errors = output.error.subscribe();

    input.view_will_appear.send(());

    eventually("expired report", || navigator.count("expired") == 1).await;
    assert_silent(&mut errors).await;
}

#[tokio::test]
async fn test_other_errors_reach_error_output() {
    let (view_model, navigator) = challenge(Err(NetworkError::Server));
    let input = ChallengeInput::default();
    let output = view_model.transform(input.clone());
    let mut errors = output.error.subscribe();

    input.view_will_appear.send(());

    assert_eq!(next(&mut errors).await, NetworkError::Server.description());
    assert_eq!(navigator.count("expired"), 0);
}

#[tokio::test]
async fn test_dropping_view_model_cancels_tasks() {
    let (view_model, _) = challenge(Ok(None));
    let input = ChallengeInput::default();
    let _output = view_model.transform(input.clone());
    assert!(input.view_will_appear.subscriber_count() > 0);

    drop(view_model);

    eventually("tasks aborted", || input.view_will_appear.subscriber_count() == 0).await;
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_ignores_taps_while_in_flight() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(GatedLogin::new(Ok(())));
    let view_model = LoginViewModel::new(navigator.clone(), manager.clone());
    let input = LoginInput::default();
    let output = view_model.transform(input.clone());
    let mut loading = output.is_loading.subscribe();
    assert!(!next(&mut loading).await);

    input.kakao_login_succeeded.send("kakao".into());
    assert!(next(&mut loading).await);
    input.kakao_login_succeeded.send("kakao".into());
    sleep(QUIET).await;
    assert_eq!(manager.calls.load(Ordering::SeqCst), 1);

    manager.gate.notify_one();
    eventually("login completed", || navigator.count("login_completed") == 1).await;
    assert_eq!(manager.calls.load(Ordering::SeqCst), 1);

    // A new tap after completion goes through again
    input.kakao_login_succeeded.send("kakao".into());
    eventually("second login", || manager.calls.load(Ordering::SeqCst) == 2).await;
    manager.gate.notify_one();
    eventually("second completion", || navigator.count("login_completed") == 2).await;
}

#[tokio::test]
async fn test_unregistered_login_continues_to_onboarding() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(GatedLogin::new(Err(NetworkError::client("404", "no member"))));
    manager.gate.notify_one();
    let view_model = LoginViewModel::new(navigator.clone(), manager);
    let input = LoginInput::default();
    let _output = view_model.transform(input.clone());

    input.kakao_login_succeeded.send("kakao-1".into());

    eventually("onboarding", || navigator.count("login_failed:kakao-1") == 1).await;
}

// ============================================================================
// Onboarding
// ============================================================================

#[tokio::test]
async fn test_onboarding_pages_then_sign_up() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(FinalizingOnboarding::default());
    let view_model = OnboardingViewModel::new(navigator.clone(), manager.clone(), "kakao".into());
    let input = OnboardingInput::default();
    let output = view_model.transform(input.clone());
    let mut pregnancy_enabled = output.pregnancy_button_enabled.subscribe();
    let mut fetal_enabled = output.fetal_button_enabled.subscribe();
    let mut flow = output.onboarding_flow.subscribe();

    input.pregnancy_weeks.send("41".into());
    assert!(!next(&mut pregnancy_enabled).await);
    input.next_button_tapped.send(());
    assert_silent(&mut flow).await;

    input.pregnancy_weeks.send("20".into());
    assert!(next(&mut pregnancy_enabled).await);
    input.next_button_tapped.send(());
    assert_eq!(next(&mut flow).await, OnboardingFlow::ToFetalNickname);

    input.back_button_tapped.send(());
    assert_eq!(next(&mut flow).await, OnboardingFlow::ToPregnancy);
    input.next_button_tapped.send(());
    assert_eq!(next(&mut flow).await, OnboardingFlow::ToFetalNickname);

    input.fetal_nickname.send("콩콩이".into());
    assert!(next(&mut fetal_enabled).await);
    input.next_button_tapped.send(());
    assert_eq!(next(&mut flow).await, OnboardingFlow::SignUp);

    eventually("signup", || navigator.count("onboarding_completed:콩콩이") == 1).await;
    assert_eq!(manager.calls.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.count("back"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_onboarding_next_right_after_text_sees_the_text() {
    for _ in 0..300 {
        let view_model = OnboardingViewModel::new(
            Arc::new(RecordingNavigator::default()),
            Arc::new(FinalizingOnboarding::default()),
            "kakao".into(),
        );
        let input = OnboardingInput::default();
        let output = view_model.transform(input.clone());
        let mut flow = output.onboarding_flow.subscribe();

        input.pregnancy_weeks.send("20".into());
        input.next_button_tapped.send(());

        assert_eq!(next(&mut flow).await, OnboardingFlow::ToFetalNickname);
    }
}

#[tokio::test]
async fn test_onboarding_back_on_first_page_leaves() {
    let navigator = Arc::new(RecordingNavigator::default());
    let view_model = OnboardingViewModel::new(
        navigator.clone(),
        Arc::new(FinalizingOnboarding::default()),
        "kakao".into(),
    );
    let input = OnboardingInput::default();
    let output = view_model.transform(input.clone());
    let mut page = output.page.subscribe();
    assert_eq!(next(&mut page).await, OnboardingPage::Pregnancy);

    input.back_button_tapped.send(());

    eventually("back", || navigator.count("back") == 1).await;
}

#[tokio::test]
async fn test_onboarding_incomplete_draft_is_reported() {
    let navigator = Arc::new(RecordingNavigator::default());
    let view_model = OnboardingViewModel::new(
        navigator.clone(),
        Arc::new(FinalizingOnboarding::default()),
        String::new(),
    );
    let input = OnboardingInput::default();
    let output = view_model.transform(input.clone());
    let mut pregnancy_enabled = output.pregnancy_button_enabled.subscribe();
    let mut fetal_enabled = output.fetal_button_enabled.subscribe();
    let mut flow = output.onboarding_flow.subscribe();
    let mut errors = output.error.subscribe();

    input.pregnancy_weeks.send("12".into());
    assert!(next(&mut pregnancy_enabled).await);
    input.next_button_tapped.send(());
    assert_eq!(next(&mut flow).await, OnboardingFlow::ToFetalNickname);
    input.fetal_nickname.send("콩".into());
    assert!(next(&mut fetal_enabled).await);
    input.next_button_tapped.send(());

    // Empty Kakao token cannot be finalized
    assert_eq!(next(&mut errors).await, NetworkError::BadCasting.description());
    assert!(navigator.events().is_empty());
}

// ============================================================================
// Curriculum list / bookmarks
// ============================================================================

#[tokio::test]
async fn test_curriculum_week_paging_stops_at_bounds() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(StubContent::default());
    let view_model = CurriculumListByWeekViewModel::new(navigator.clone(), manager.clone(), 39);
    let input = CurriculumListByWeekInput::default();
    let output = view_model.transform(input.clone());
    let mut week = output.week.subscribe();

    input.view_will_appear.send(());
    assert_eq!(next(&mut week).await.week, 39);
    input.next_week_tapped.send(());
    assert_eq!(next(&mut week).await.week, 40);
    input.next_week_tapped.send(());
    assert_silent(&mut week).await;
    input.previous_week_tapped.send(());
    assert_eq!(next(&mut week).await.week, 39);

    assert_eq!(*manager.weeks_requested.lock(), vec![39, 40, 39]);
    assert_eq!(view_model.current_week(), 39);
}

#[tokio::test]
async fn test_curriculum_paging_needs_a_shown_week() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(StubContent::default());
    let view_model = CurriculumListByWeekViewModel::new(navigator.clone(), manager.clone(), 12);
    let input = CurriculumListByWeekInput::default();
    let output = view_model.transform(input.clone());
    let mut week = output.week.subscribe();

    input.next_week_tapped.send(());
    assert_silent(&mut week).await;
    assert!(manager.weeks_requested.lock().is_empty());

    input.view_will_appear.send(());
    assert_eq!(next(&mut week).await.week, 12);
    input.next_week_tapped.send(());
    assert_eq!(next(&mut week).await.week, 13);
}

#[tokio::test]
async fn test_curriculum_bookmark_updates_shown_week() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(StubContent::default());
    let view_model = CurriculumListByWeekViewModel::new(navigator.clone(), manager.clone(), 5);
    let input = CurriculumListByWeekInput::default();
    let output = view_model.transform(input.clone());
    let mut week = output.week.subscribe();
    let mut completed = output.bookmark_completed.subscribe();

    input.view_will_appear.send(());
    assert!(!next(&mut week).await.articles[0].is_marked);

    input.bookmark_tapped.send((ArticleId(50), true));
    assert!(next(&mut week).await.articles[0].is_marked);
    assert_eq!(next(&mut completed).await, (ArticleId(50), true));

    input.article_tapped.send(ArticleId(50));
    input.back_button_tapped.send(());
    eventually("navigation", || navigator.events().len() == 2).await;
    assert_eq!(navigator.count("article:50"), 1);
    assert_eq!(navigator.count("back"), 1);
}

#[tokio::test]
async fn test_bookmark_removal_updates_list() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(StubContent::default());
    let view_model = BookmarkViewModel::new(navigator.clone(), manager.clone());
    let input = BookmarkInput::default();
    let output = view_model.transform(input.clone());
    let mut bookmarks = output.bookmarks.subscribe();

    input.view_will_appear.send(());
    assert_eq!(next(&mut bookmarks).await.articles.len(), 2);

    input.bookmark_removed.send(ArticleId(1));
    let updated = next(&mut bookmarks).await;
    assert_eq!(updated.articles.len(), 1);
    assert_eq!(updated.articles[0].article_id, ArticleId(2));
    assert_eq!(*manager.bookmark_calls.lock(), vec![(ArticleId(1), false)]);

    input.bookmark_cell_tapped.send(ArticleId(2));
    eventually("cell tap", || navigator.count("bookmark_cell:2") == 1).await;
}

#[tokio::test]
async fn test_bookmark_failure_keeps_list_and_reports() {
    let navigator = Arc::new(RecordingNavigator::default());
    let manager = Arc::new(StubContent::failing(NetworkError::Unauthorized));
    let view_model = BookmarkViewModel::new(navigator.clone(), manager);
    let input = BookmarkInput::default();
    let output = view_model.transform(input.clone());
    let mut bookmarks = output.bookmarks.subscribe();

    input.view_will_appear.send(());

    eventually("expired report", || navigator.count("expired") == 1).await;
    assert_silent(&mut bookmarks).await;
}
