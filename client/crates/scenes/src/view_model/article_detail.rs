//! Article detail screen
//!
//! Renders the article as a flat block list; the bookmark flag is kept
//! separately so toggling does not re-render the blocks.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::{ArticleId, BlockType};

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug, route_error};
use crate::manager::ArticleDetailManager;
use crate::navigator::ArticleDetailNavigation;
use crate::reactive::{CurrentValueSubject, DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct ArticleDetailInput {
    pub view_will_appear: Subject<()>,
    /// Requested bookmark state
    pub bookmark_tapped: Subject<bool>,
    pub close_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct ArticleDetailOutput {
    pub blocks: Publisher<Vec<BlockType>>,
    pub is_marked: Publisher<bool>,
    pub error: Publisher<String>,
}

pub struct ArticleDetailViewModel {
    navigator: Arc<dyn ArticleDetailNavigation>,
    manager: Arc<dyn ArticleDetailManager>,
    article_id: ArticleId,
    blocks: Subject<Vec<BlockType>>,
    is_marked: CurrentValueSubject<bool>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl ArticleDetailViewModel {
    pub fn new(
        navigator: Arc<dyn ArticleDetailNavigation>,
        manager: Arc<dyn ArticleDetailManager>,
        article_id: ArticleId,
    ) -> Self {
        Self {
            navigator,
            manager,
            article_id,
            blocks: Subject::new(),
            is_marked: CurrentValueSubject::new(false),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }

    pub fn article_id(&self) -> ArticleId {
        self.article_id
    }
}

impl ViewModel for ArticleDetailViewModel {
    type Input = ArticleDetailInput;
    type Output = ArticleDetailOutput;

    fn transform(&self, input: ArticleDetailInput) -> ArticleDetailOutput {
        if first_transform(&self.transformed, "article_detail") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let article_id = self.article_id;
            let blocks = self.blocks.clone();
            let is_marked = self.is_marked.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.view_will_appear.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let blocks = blocks.clone();
                let is_marked = is_marked.clone();
                let errors = errors.clone();
                async move {
                    match manager.article_detail(article_id).await {
                        Ok(detail) => {
                            is_marked.send(detail.is_marked);
                            blocks.send(detail.blocks());
                        }
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let is_marked = self.is_marked.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.bookmark_tapped.events(), move |requested: bool| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let is_marked = is_marked.clone();
                let errors = errors.clone();
                async move {
                    match manager.set_bookmark(article_id, requested).await {
                        Ok(()) => is_marked.send(requested),
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.close_button_tapped.events(), move |()| {
                navigator.close_button_tapped();
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        ArticleDetailOutput {
            blocks: self.blocks.publisher(),
            is_marked: self.is_marked.publisher(),
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(ArticleDetailViewModel);
