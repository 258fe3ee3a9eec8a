//! Article list of one category

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::{ArticleCategory, ArticleId, ArticleSummary};
use parking_lot::Mutex;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug, route_error};
use crate::manager::ArticleListByCategoryManager;
use crate::navigator::ArticleListByCategoryNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct ArticleListByCategoryInput {
    pub view_will_appear: Subject<()>,
    pub article_tapped: Subject<ArticleId>,
    /// Article and its requested bookmark state
    pub bookmark_tapped: Subject<(ArticleId, bool)>,
    pub back_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct ArticleListByCategoryOutput {
    pub category: ArticleCategory,
    pub articles: Publisher<Vec<ArticleSummary>>,
    pub bookmark_completed: Publisher<(ArticleId, bool)>,
    pub error: Publisher<String>,
}

pub struct ArticleListByCategoryViewModel {
    navigator: Arc<dyn ArticleListByCategoryNavigation>,
    manager: Arc<dyn ArticleListByCategoryManager>,
    category: ArticleCategory,
    list: Arc<Mutex<Vec<ArticleSummary>>>,
    articles: Subject<Vec<ArticleSummary>>,
    bookmark_completed: Subject<(ArticleId, bool)>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl ArticleListByCategoryViewModel {
    pub fn new(
        navigator: Arc<dyn ArticleListByCategoryNavigation>,
        manager: Arc<dyn ArticleListByCategoryManager>,
        category: ArticleCategory,
    ) -> Self {
        Self {
            navigator,
            manager,
            category,
            list: Arc::new(Mutex::new(Vec::new())),
            articles: Subject::new(),
            bookmark_completed: Subject::new(),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }

    pub fn category(&self) -> ArticleCategory {
        self.category
    }
}

impl ViewModel for ArticleListByCategoryViewModel {
    type Input = ArticleListByCategoryInput;
    type Output = ArticleListByCategoryOutput;

    fn transform(&self, input: ArticleListByCategoryInput) -> ArticleListByCategoryOutput {
        if first_transform(&self.transformed, "article_list_by_category") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let category = self.category;
            let list = self.list.clone();
            let articles = self.articles.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.view_will_appear.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let list = list.clone();
                let articles = articles.clone();
                let errors = errors.clone();
                async move {
                    match manager.articles(category).await {
                        Ok(fetched) => {
                            *list.lock() = fetched.clone();
                            articles.send(fetched);
                        }
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let list = self.list.clone();
            let articles = self.articles.clone();
            let completed = self.bookmark_completed.clone();
            let errors = self.errors.clone();
            bind(
                &mut event_loop,
                input.bookmark_tapped.events(),
                move |(article_id, is_marked)| {
                    let navigator = navigator.clone();
                    let manager = manager.clone();
                    let list = list.clone();
                    let articles = articles.clone();
                    let completed = completed.clone();
                    let errors = errors.clone();
                    async move {
                        match manager.set_bookmark(article_id, is_marked).await {
                            Ok(()) => {
                                let updated = {
                                    let mut list = list.lock();
                                    if let Some(item) =
                                        list.iter_mut().find(|a| a.article_id == article_id)
                                    {
                                        item.is_marked = is_marked;
                                    }
                                    list.clone()
                                };
                                articles.send(updated);
                                completed.send((article_id, is_marked));
                            }
                            Err(error) => route_error(error, navigator.as_ref(), &errors),
                        }
                    }
                },
            );

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.article_tapped.events(), move |article_id| {
                navigator.article_tapped(article_id);
                std::future::ready(())
            });

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.back_button_tapped.events(), move |()| {
                navigator.back_button_tapped();
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        ArticleListByCategoryOutput {
            category: self.category,
            articles: self.articles.publisher(),
            bookmark_completed: self.bookmark_completed.publisher(),
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(ArticleListByCategoryViewModel);
