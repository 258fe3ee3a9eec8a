//! View Models
//!
//! Every screen's logic follows one contract: [`ViewModel::transform`] takes a
//! bundle of input event streams and returns a bundle of output streams.
//!
//! ## Rules
//! - `transform` subscribes to every input before returning, so no input
//!   event sent afterwards is lost
//! - Side effects (manager calls, navigation) run in one task per view model,
//!   owned by its [`DisposeBag`](crate::reactive::DisposeBag); dropping the
//!   view model cancels it
//! - Input events are handled in the order they were sent, across all input
//!   streams. A handler runs up to its first pending await before the next
//!   event is looked at; only the awaited remainder overlaps later events
//! - Tasks capture clones of the navigator / manager / subjects, never the
//!   view model itself
//! - `transform` binds side effects once; later calls only hand out outputs
//! - `Unauthorized` errors go to the navigator's expired-token capability;
//!   every other error becomes a user-facing message on the `error` output

pub mod article_category;
pub mod article_detail;
pub mod article_list_by_category;
pub mod bookmark;
pub mod challenge;
pub mod complete_onboarding;
pub mod curriculum;
pub mod curriculum_list_by_week;
pub mod login;
pub mod my_page;
pub mod onboarding;
pub mod splash;
pub mod today;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use kernel::NetworkError;

use crate::navigator::{ExpiredTokenNavigation, NavigationBarNavigation};
use crate::reactive::{DisposeBag, EventStream, Subject, ordered};

pub use article_category::{ArticleCategoryInput, ArticleCategoryOutput, ArticleCategoryViewModel};
pub use article_detail::{ArticleDetailInput, ArticleDetailOutput, ArticleDetailViewModel};
pub use article_list_by_category::{
    ArticleListByCategoryInput, ArticleListByCategoryOutput, ArticleListByCategoryViewModel,
};
pub use bookmark::{BookmarkInput, BookmarkOutput, BookmarkViewModel};
pub use challenge::{ChallengeInput, ChallengeOutput, ChallengeViewModel};
pub use complete_onboarding::{
    CompleteOnboardingInput, CompleteOnboardingOutput, CompleteOnboardingViewModel,
};
pub use curriculum::{CurriculumInput, CurriculumOutput, CurriculumViewModel};
pub use curriculum_list_by_week::{
    CurriculumListByWeekInput, CurriculumListByWeekOutput, CurriculumListByWeekViewModel,
};
pub use login::{LoginInput, LoginOutput, LoginViewModel};
pub use my_page::{MyPageInput, MyPageOutput, MyPageViewModel};
pub use onboarding::{
    OnboardingFlow, OnboardingInput, OnboardingOutput, OnboardingPage, OnboardingViewModel,
};
pub use splash::{SplashInput, SplashOutput, SplashViewModel};
pub use today::{TodayInput, TodayOutput, TodayViewModel};

/// Input streams in, output streams out
pub trait ViewModel: Send + Sync {
    type Input;
    type Output;

    fn transform(&self, input: Self::Input) -> Self::Output;
}

/// Navigation-bar intent, also published as a view-model output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationFlow {
    BookmarkButtonTapped,
    MyPageButtonTapped,
}

// ============================================================================
// Helpers
// ============================================================================

/// True on the first `transform` call only
pub(crate) fn first_transform(transformed: &AtomicBool, scene: &'static str) -> bool {
    if transformed.swap(true, Ordering::AcqRel) {
        tracing::warn!(scene, "transform called again; side effects stay bound once");
        return false;
    }
    true
}

type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// A view model's input handlers, run from one task in send order
#[derive(Default)]
pub(crate) struct EventLoop {
    sources: Vec<EventStream<Job>>,
}

impl EventLoop {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start handling events inside `bag`
    pub(crate) fn run(self, bag: &DisposeBag) {
        let mut events = ordered(self.sources);
        bag.spawn(async move {
            let mut running = FuturesUnordered::<BoxFuture<'static, ()>>::new();
            loop {
                tokio::select! {
                    event = events.next() => {
                        let Some(event) = event else { break };
                        let mut work = (event.value)();
                        if futures::poll!(work.as_mut()).is_pending() {
                            running.push(work);
                        }
                    }
                    Some(()) = running.next(), if !running.is_empty() => {}
                }
            }
            // Inputs are gone; let started work complete
            while running.next().await.is_some() {}
        });
    }
}

/// Register `handler` for every event of `events`
pub(crate) fn bind<T, F, Fut>(event_loop: &mut EventLoop, events: EventStream<T>, handler: F)
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let handler = Arc::new(handler);
    let jobs = events.map(move |event| {
        let handler = handler.clone();
        event.map(move |value| -> Job { Box::new(move || (*handler)(value).boxed()) })
    });
    event_loop.sources.push(jobs.boxed());
}

/// Send an error where it belongs
pub(crate) fn route_error<N>(error: NetworkError, navigator: &N, errors: &Subject<String>)
where
    N: ExpiredTokenNavigation + ?Sized,
{
    if error.is_unauthorized() {
        tracing::info!("Session could not be recovered");
        navigator.check_token_is_expired();
    } else {
        tracing::warn!(error = %error, kind = ?error.kind(), "Screen request failed");
        errors.send(error.description());
    }
}

pub(crate) fn navigate<N>(flow: NavigationFlow, navigator: &N)
where
    N: NavigationBarNavigation + ?Sized,
{
    match flow {
        NavigationFlow::BookmarkButtonTapped => navigator.bookmark_button_tapped(),
        NavigationFlow::MyPageButtonTapped => navigator.my_page_button_tapped(),
    }
}

/// `Debug` that only names the view model
macro_rules! opaque_debug {
    ($name:ident) => {
        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}
pub(crate) use opaque_debug;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingNavigator {
        expired: AtomicUsize,
        bookmark: AtomicUsize,
        my_page: AtomicUsize,
    }

    impl ExpiredTokenNavigation for CountingNavigator {
        fn check_token_is_expired(&self) {
            self.expired.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl NavigationBarNavigation for CountingNavigator {
        fn bookmark_button_tapped(&self) {
            self.bookmark.fetch_add(1, Ordering::SeqCst);
        }

        fn my_page_button_tapped(&self) {
            self.my_page.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_route_error_splits_unauthorized() {
        let navigator = CountingNavigator::default();
        let errors = Subject::new();
        let mut received = errors.subscribe();

        route_error(NetworkError::Unauthorized, &navigator, &errors);
        route_error(NetworkError::Server, &navigator, &errors);

        assert_eq!(navigator.expired.load(Ordering::SeqCst), 1);
        assert_eq!(received.next().await, Some(NetworkError::Server.description()));
    }

    #[test]
    fn test_navigate_dispatches_flow() {
        let navigator = CountingNavigator::default();
        navigate(NavigationFlow::BookmarkButtonTapped, &navigator);
        navigate(NavigationFlow::MyPageButtonTapped, &navigator);
        navigate(NavigationFlow::MyPageButtonTapped, &navigator);

        assert_eq!(navigator.bookmark.load(Ordering::SeqCst), 1);
        assert_eq!(navigator.my_page.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_event_loop_keeps_order_across_inputs() {
        for _ in 0..200 {
            let text = Subject::<u32>::new();
            let tap = Subject::<()>::new();
            let latest = Arc::new(parking_lot::Mutex::new(None));
            let seen = Subject::<Option<u32>>::new();
            let mut seen_stream = seen.subscribe();

            let bag = DisposeBag::new();
            let mut event_loop = EventLoop::new();
            let stored = latest.clone();
            bind(&mut event_loop, text.events(), move |value| {
                *stored.lock() = Some(value);
                std::future::ready(())
            });
            let read = latest.clone();
            bind(&mut event_loop, tap.events(), move |()| {
                seen.send(*read.lock());
                std::future::ready(())
            });
            event_loop.run(&bag);

            text.send(20);
            tap.send(());

            let observed = tokio::time::timeout(std::time::Duration::from_secs(1), seen_stream.next())
                .await
                .unwrap();
            assert_eq!(observed, Some(Some(20)));
        }
    }

    #[tokio::test]
    async fn test_event_loop_overlaps_awaited_work() {
        let slow = Subject::<()>::new();
        let fast = Subject::<()>::new();
        let gate = Arc::new(tokio::sync::Notify::new());
        let done = Subject::<&'static str>::new();
        let mut done_stream = done.subscribe();

        let bag = DisposeBag::new();
        let mut event_loop = EventLoop::new();
        let (slow_gate, slow_done) = (gate.clone(), done.clone());
        bind(&mut event_loop, slow.events(), move |()| {
            let gate = slow_gate.clone();
            let done = slow_done.clone();
            async move {
                gate.notified().await;
                done.send("slow");
            }
        });
        let fast_done = done.clone();
        bind(&mut event_loop, fast.events(), move |()| {
            fast_done.send("fast");
            std::future::ready(())
        });
        event_loop.run(&bag);

        slow.send(());
        fast.send(());
        let wait = std::time::Duration::from_secs(1);
        assert_eq!(tokio::time::timeout(wait, done_stream.next()).await.unwrap(), Some("fast"));
        gate.notify_one();
        assert_eq!(tokio::time::timeout(wait, done_stream.next()).await.unwrap(), Some("slow"));
    }

    #[test]
    fn test_first_transform_only_once() {
        let flag = AtomicBool::new(false);
        assert!(first_transform(&flag, "test"));
        assert!(!first_transform(&flag, "test"));
    }
}
