//! Category tab
//!
//! The category grid and the per-category article list share this
//! coordinator's stack; the list is pushed directly rather than through a
//! child flow.

use std::sync::{Arc, Weak};

use content::models::{ArticleCategory, ArticleId};

use super::{Coordinator, CoordinatorCore, RootFlow, spawn_article, spawn_bookmark, spawn_my_page};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct ArticleCategoryCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
}

impl ArticleCategoryCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("article_category", navigation, root),
            this: this.clone(),
            factory,
        })
    }

    pub fn show_article_category(&self) {
        self.core
            .push_root(self.factory.make_article_category(self.this.clone()));
    }

    pub fn show_article_list_by_category(&self, category: ArticleCategory) {
        let screen = self
            .factory
            .make_article_list_by_category(self.this.clone(), category);
        self.core.navigation().push(screen);
    }

    pub fn show_article_detail(&self, article_id: ArticleId) {
        spawn_article(self, &self.factory, article_id);
    }

    pub fn show_bookmark(&self) {
        spawn_bookmark(self, &self.factory);
    }

    pub fn show_my_page(&self) {
        spawn_my_page(self, &self.factory);
    }
}

impl Coordinator for ArticleCategoryCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_article_category();
        }
    }
}
