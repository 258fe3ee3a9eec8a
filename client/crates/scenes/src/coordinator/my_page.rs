//! My page flow, pushed from any main tab

use std::sync::{Arc, Weak};

use super::{Coordinator, CoordinatorCore, RootFlow};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct MyPageCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
}

impl MyPageCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("my_page", navigation, root),
            this: this.clone(),
            factory,
        })
    }

    pub fn show_my_page(&self) {
        self.core
            .push_root(self.factory.make_my_page(self.this.clone()));
    }

    /// Logout or resign went through; leave the main flow
    pub fn end_session(&self) {
        match self.core.root() {
            Some(root) => root.session_ended(),
            None => tracing::warn!("Root flow already released"),
        }
    }
}

impl Coordinator for MyPageCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_my_page();
        }
    }
}
