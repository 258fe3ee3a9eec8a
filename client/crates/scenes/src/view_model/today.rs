//! Today tab screen

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::{ArticleId, TodayArticle};
use parking_lot::Mutex;

use super::{
    EventLoop, NavigationFlow, ViewModel, bind, first_transform, navigate, opaque_debug,
    route_error,
};
use crate::manager::TodayManager;
use crate::navigator::TodayNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct TodayInput {
    pub view_will_appear: Subject<()>,
    pub navigation_left_button_tapped: Subject<()>,
    pub navigation_right_button_tapped: Subject<()>,
    pub today_article_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct TodayOutput {
    pub today_article: Publisher<TodayArticle>,
    pub navigation_flow: Publisher<NavigationFlow>,
    pub error: Publisher<String>,
}

pub struct TodayViewModel {
    navigator: Arc<dyn TodayNavigation>,
    manager: Arc<dyn TodayManager>,
    /// Article currently on screen
    shown: Arc<Mutex<Option<ArticleId>>>,
    today_article: Subject<TodayArticle>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl TodayViewModel {
    pub fn new(navigator: Arc<dyn TodayNavigation>, manager: Arc<dyn TodayManager>) -> Self {
        Self {
            navigator,
            manager,
            shown: Arc::new(Mutex::new(None)),
            today_article: Subject::new(),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for TodayViewModel {
    type Input = TodayInput;
    type Output = TodayOutput;

    fn transform(&self, input: TodayInput) -> TodayOutput {
        let navigation_flow = input
            .navigation_left_button_tapped
            .publisher()
            .map(|()| NavigationFlow::BookmarkButtonTapped)
            .merge(
                &input
                    .navigation_right_button_tapped
                    .publisher()
                    .map(|()| NavigationFlow::MyPageButtonTapped),
            );

        if first_transform(&self.transformed, "today") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            bind(&mut event_loop, navigation_flow.events(), move |flow| {
                navigate(flow, navigator.as_ref());
                std::future::ready(())
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let shown = self.shown.clone();
            let today_article = self.today_article.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.view_will_appear.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let shown = shown.clone();
                let today_article = today_article.clone();
                let errors = errors.clone();
                async move {
                    match manager.today_article().await {
                        Ok(article) => {
                            *shown.lock() = Some(article.article_id);
                            today_article.send(article);
                        }
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            let shown = self.shown.clone();
            bind(&mut event_loop, input.today_article_tapped.events(), move |()| {
                let article_id = *shown.lock();
                match article_id {
                    Some(article_id) => navigator.today_article_tapped(article_id),
                    None => tracing::debug!("No article loaded yet; tap ignored"),
                }
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        TodayOutput {
            today_article: self.today_article.publisher(),
            navigation_flow,
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(TodayViewModel);
