//! Article detail flow
//!
//! Presented modally over whatever stack spawned it; finishing dismisses the
//! modal instead of touching the stack.

use std::sync::{Arc, Weak};

use content::models::ArticleId;

use super::{Coordinator, CoordinatorCore, RootFlow};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct ArticleCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
    article_id: ArticleId,
}

impl ArticleCoordinator {
    pub const NAME: &'static str = "article";

    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
        article_id: ArticleId,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new(Self::NAME, navigation, root),
            this: this.clone(),
            factory,
            article_id,
        })
    }

    pub fn article_id(&self) -> ArticleId {
        self.article_id
    }

    pub fn show_article_detail(&self) {
        let screen = self
            .factory
            .make_article_detail(self.this.clone(), self.article_id);
        self.core.navigation().present(screen);
    }
}

impl Coordinator for ArticleCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_article_detail();
        }
    }

    fn tear_down(&self) {
        self.core.navigation().dismiss();
    }

    fn pop(&self) {
        self.finish();
    }
}
