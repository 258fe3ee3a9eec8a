//! Bookmark flow, pushed from any main tab

use std::sync::{Arc, Weak};

use content::models::ArticleId;

use super::{Coordinator, CoordinatorCore, RootFlow, spawn_article};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct BookmarkCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
}

impl BookmarkCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("bookmark", navigation, root),
            this: this.clone(),
            factory,
        })
    }

    pub fn show_bookmark(&self) {
        self.core
            .push_root(self.factory.make_bookmark(self.this.clone()));
    }

    pub fn show_article_detail(&self, article_id: ArticleId) {
        spawn_article(self, &self.factory, article_id);
    }
}

impl Coordinator for BookmarkCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_bookmark();
        }
    }
}
