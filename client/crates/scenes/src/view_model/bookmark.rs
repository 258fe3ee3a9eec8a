//! Bookmark screen

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::{ArticleId, BookmarkList};
use parking_lot::Mutex;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug, route_error};
use crate::manager::BookmarkManager;
use crate::navigator::BookmarkNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct BookmarkInput {
    pub view_will_appear: Subject<()>,
    pub bookmark_cell_tapped: Subject<ArticleId>,
    /// Bookmark button of a cell; removes the article from the list
    pub bookmark_removed: Subject<ArticleId>,
    pub back_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct BookmarkOutput {
    pub bookmarks: Publisher<BookmarkList>,
    pub error: Publisher<String>,
}

pub struct BookmarkViewModel {
    navigator: Arc<dyn BookmarkNavigation>,
    manager: Arc<dyn BookmarkManager>,
    list: Arc<Mutex<BookmarkList>>,
    bookmarks: Subject<BookmarkList>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl BookmarkViewModel {
    pub fn new(navigator: Arc<dyn BookmarkNavigation>, manager: Arc<dyn BookmarkManager>) -> Self {
        Self {
            navigator,
            manager,
            list: Arc::new(Mutex::new(BookmarkList::default())),
            bookmarks: Subject::new(),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for BookmarkViewModel {
    type Input = BookmarkInput;
    type Output = BookmarkOutput;

    fn transform(&self, input: BookmarkInput) -> BookmarkOutput {
        if first_transform(&self.transformed, "bookmark") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let list = self.list.clone();
            let bookmarks = self.bookmarks.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.view_will_appear.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let list = list.clone();
                let bookmarks = bookmarks.clone();
                let errors = errors.clone();
                async move {
                    match manager.bookmarks().await {
                        Ok(fetched) => {
                            *list.lock() = fetched.clone();
                            bookmarks.send(fetched);
                        }
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let list = self.list.clone();
            let bookmarks = self.bookmarks.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.bookmark_removed.events(), move |article_id| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let list = list.clone();
                let bookmarks = bookmarks.clone();
                let errors = errors.clone();
                async move {
                    match manager.set_bookmark(article_id, false).await {
                        Ok(()) => {
                            let updated = {
                                let mut list = list.lock();
                                list.remove(article_id);
                                list.clone()
                            };
                            bookmarks.send(updated);
                        }
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.bookmark_cell_tapped.events(), move |article_id| {
                navigator.bookmark_cell_tapped(article_id);
                std::future::ready(())
            });

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.back_button_tapped.events(), move |()| {
                navigator.back_button_tapped();
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        BookmarkOutput {
            bookmarks: self.bookmarks.publisher(),
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(BookmarkViewModel);
