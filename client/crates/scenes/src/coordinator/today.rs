//! Today tab: today's article, plus bookmark / my-page / article sub-flows

use std::sync::{Arc, Weak};

use content::models::ArticleId;

use super::{Coordinator, CoordinatorCore, RootFlow, spawn_article, spawn_bookmark, spawn_my_page};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct TodayCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
}

impl TodayCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("today", navigation, root),
            this: this.clone(),
            factory,
        })
    }

    pub fn show_today(&self) {
        self.core.push_root(self.factory.make_today(self.this.clone()));
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

impl Coordinator for TodayCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_today();
        }
    }
}
