//! Challenge tab: attendance progress, plus bookmark / my-page sub-flows

use std::sync::{Arc, Weak};

use super::{Coordinator, CoordinatorCore, RootFlow, spawn_bookmark, spawn_my_page};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct ChallengeCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
}

impl ChallengeCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("challenge", navigation, root),
            this: this.clone(),
            factory,
        })
    }

    pub fn show_challenge(&self) {
        self.core
            .push_root(self.factory.make_challenge(self.this.clone()));
    }

    pub fn show_bookmark(&self) {
        spawn_bookmark(self, &self.factory);
    }

    pub fn show_my_page(&self) {
        spawn_my_page(self, &self.factory);
    }
}

impl Coordinator for ChallengeCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_challenge();
        }
    }
}
