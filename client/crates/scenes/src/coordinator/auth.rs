//! Auth flow: login, onboarding for new members, onboarding completion

use std::sync::{Arc, Weak};

use auth::UserOnboardingModel;

use super::{Coordinator, CoordinatorCore, RootFlow};
use crate::factory::SceneFactory;
use crate::navigation::NavigationController;

pub struct AuthCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
}

impl AuthCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("auth", navigation, root),
            this: this.clone(),
            factory,
        })
    }

    pub fn show_login(&self) {
        self.core.set_root(self.factory.make_login(self.this.clone()));
    }

    /// Unregistered social account; collect onboarding data
    pub fn show_onboarding(&self, kakao_access_token: String) {
        let screen = self
            .factory
            .make_onboarding(self.this.clone(), kakao_access_token);
        self.core.navigation().push(screen);
    }

    pub fn show_complete_onboarding(&self, model: UserOnboardingModel) {
        let screen = self
            .factory
            .make_complete_onboarding(self.this.clone(), model);
        self.core.navigation().push(screen);
    }

    /// Hand over to the main flow
    pub fn complete(&self) {
        match self.core.root() {
            Some(root) => root.session_established(),
            None => tracing::warn!("Root flow already released"),
        }
    }
}

impl Coordinator for AuthCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_login();
        }
    }
}
