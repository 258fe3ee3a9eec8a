//! Curriculum tab: weekly progress and the per-week article list

use std::sync::{Arc, Weak};

use content::models::ArticleId;

use super::{Coordinator, CoordinatorCore, RootFlow, spawn_article, spawn_bookmark, spawn_my_page};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct CurriculumCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
}

impl CurriculumCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("curriculum", navigation, root),
            this: this.clone(),
            factory,
        })
    }

    pub fn show_curriculum(&self) {
        self.core
            .push_root(self.factory.make_curriculum(self.this.clone()));
    }

    pub fn show_curriculum_list_by_week(&self, week: u8) {
        let screen = self
            .factory
            .make_curriculum_list_by_week(self.this.clone(), week);
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

impl Coordinator for CurriculumCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_curriculum();
        }
    }
}
