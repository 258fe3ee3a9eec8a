//! Curriculum articles of one week, with previous / next week paging

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::{ArticleId, CurriculumWeek};
use parking_lot::Mutex;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug, route_error};
use crate::manager::CurriculumListManager;
use crate::navigator::CurriculumListByWeekNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct CurriculumListByWeekInput {
    pub view_will_appear: Subject<()>,
    pub previous_week_tapped: Subject<()>,
    pub next_week_tapped: Subject<()>,
    pub article_tapped: Subject<ArticleId>,
    pub bookmark_tapped: Subject<(ArticleId, bool)>,
    pub back_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct CurriculumListByWeekOutput {
    pub week: Publisher<CurriculumWeek>,
    pub bookmark_completed: Publisher<(ArticleId, bool)>,
    pub error: Publisher<String>,
}

/// Everything a week load needs, cloned into each task
#[derive(Clone)]
struct WeekLoader {
    navigator: Arc<dyn CurriculumListByWeekNavigation>,
    manager: Arc<dyn CurriculumListManager>,
    current: Arc<Mutex<u8>>,
    shown: Arc<Mutex<Option<CurriculumWeek>>>,
    week: Subject<CurriculumWeek>,
    errors: Subject<String>,
}

impl WeekLoader {
    async fn load(self, week: u8) {
        match self.manager.articles_by_week(week).await {
            Ok(loaded) => {
                *self.current.lock() = loaded.week;
                *self.shown.lock() = Some(loaded.clone());
                self.week.send(loaded);
            }
            Err(error) => route_error(error, self.navigator.as_ref(), &self.errors),
        }
    }

    /// Week to page to, if the shown week has a neighbour in that direction
    fn neighbour(&self, forward: bool) -> Option<u8> {
        let shown = self.shown.lock();
        let shown = shown.as_ref()?;
        if forward {
            shown.next_week()
        } else {
            shown.previous_week()
        }
    }
}

pub struct CurriculumListByWeekViewModel {
    loader: WeekLoader,
    bookmark_completed: Subject<(ArticleId, bool)>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl CurriculumListByWeekViewModel {
    pub fn new(
        navigator: Arc<dyn CurriculumListByWeekNavigation>,
        manager: Arc<dyn CurriculumListManager>,
        week: u8,
    ) -> Self {
        Self {
            loader: WeekLoader {
                navigator,
                manager,
                current: Arc::new(Mutex::new(week)),
                shown: Arc::new(Mutex::new(None)),
                week: Subject::new(),
                errors: Subject::new(),
            },
            bookmark_completed: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }

    pub fn current_week(&self) -> u8 {
        *self.loader.current.lock()
    }

    fn bind_paging(&self, input: &CurriculumListByWeekInput, event_loop: &mut EventLoop) {
        let loader = self.loader.clone();
        bind(event_loop, input.view_will_appear.events(), move |()| {
            let loader = loader.clone();
            let week = *loader.current.lock();
            loader.load(week)
        });

        for (events, forward) in [
            (input.previous_week_tapped.events(), false),
            (input.next_week_tapped.events(), true),
        ] {
            let loader = self.loader.clone();
            bind(event_loop, events, move |()| {
                let loader = loader.clone();
                async move {
                    match loader.neighbour(forward) {
                        Some(week) => loader.load(week).await,
                        None => tracing::debug!(forward, "No week in that direction"),
                    }
                }
            });
        }
    }

    fn bind_bookmark(&self, input: &CurriculumListByWeekInput, event_loop: &mut EventLoop) {
        let loader = self.loader.clone();
        let completed = self.bookmark_completed.clone();
        bind(
            event_loop,
            input.bookmark_tapped.events(),
            move |(article_id, is_marked)| {
                let loader = loader.clone();
                let completed = completed.clone();
                async move {
                    if let Err(error) = loader.manager.set_bookmark(article_id, is_marked).await {
                        route_error(error, loader.navigator.as_ref(), &loader.errors);
                        return;
                    }
                    let updated = {
                        let mut shown = loader.shown.lock();
                        if let Some(week) = shown.as_mut() {
                            for article in week.articles.iter_mut() {
                                if article.article_id == article_id {
                                    article.is_marked = is_marked;
                                }
                            }
                        }
                        shown.clone()
                    };
                    if let Some(week) = updated {
                        loader.week.send(week);
                    }
                    completed.send((article_id, is_marked));
                }
            },
        );
    }
}

impl ViewModel for CurriculumListByWeekViewModel {
    type Input = CurriculumListByWeekInput;
    type Output = CurriculumListByWeekOutput;

    fn transform(&self, input: CurriculumListByWeekInput) -> CurriculumListByWeekOutput {
        if first_transform(&self.transformed, "curriculum_list_by_week") {
            let mut event_loop = EventLoop::new();
            self.bind_paging(&input, &mut event_loop);
            self.bind_bookmark(&input, &mut event_loop);

            let navigator = self.loader.navigator.clone();
            bind(&mut event_loop, input.article_tapped.events(), move |article_id| {
                navigator.article_tapped(article_id);
                std::future::ready(())
            });

            let navigator = self.loader.navigator.clone();
            bind(&mut event_loop, input.back_button_tapped.events(), move |()| {
                navigator.back_button_tapped();
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        CurriculumListByWeekOutput {
            week: self.loader.week.publisher(),
            bookmark_completed: self.bookmark_completed.publisher(),
            error: self.loader.errors.publisher(),
        }
    }
}

opaque_debug!(CurriculumListByWeekViewModel);
