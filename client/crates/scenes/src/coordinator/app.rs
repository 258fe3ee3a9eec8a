//! Root coordinator
//!
//! Owns the window's navigation stack. Shows splash on launch, then switches
//! between the auth flow and the main tab flow. Implements [`RootFlow`], so
//! every "session expired" report anywhere in the tree lands here.

use std::sync::{Arc, Weak};

use auth::TokenState;
use parking_lot::Mutex;

use super::auth::AuthCoordinator;
use super::tabbar::TabbarCoordinator;
use super::{Coordinator, CoordinatorCore, RootFlow};
use crate::factory::SceneFactory;
use crate::manager::SessionControl;
use crate::navigation::NavigationController;

/// Top-level flow currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Launch,
    Auth,
    Main,
}

pub struct AppCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
    session: Arc<dyn SessionControl>,
    flow: Mutex<AppFlow>,
}

impl AppCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        session: Arc<dyn SessionControl>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let root: Weak<dyn RootFlow> = this.clone();
            Self {
                core: CoordinatorCore::new("app", navigation, root),
                this: this.clone(),
                factory,
                session,
                flow: Mutex::new(AppFlow::Launch),
            }
        })
    }

    pub fn flow(&self) -> AppFlow {
        *self.flow.lock()
    }

    fn switch_flow(&self, flow: AppFlow) {
        let previous = std::mem::replace(&mut *self.flow.lock(), flow);
        tracing::info!(from = ?previous, to = ?flow, "App flow switched");
    }

    pub fn show_splash(&self) {
        self.core.set_root(self.factory.make_splash(self.this.clone()));
    }

    /// Splash finished its token check
    pub fn check_token(&self, state: TokenState) {
        match state {
            TokenState::Valid => self.show_tabbar(),
            TokenState::Expired | TokenState::Empty => self.show_login(),
        }
    }

    pub fn show_login(&self) {
        self.finish_children();
        self.switch_flow(AppFlow::Auth);
        let child = AuthCoordinator::new(
            self.core.navigation().clone(),
            self.factory.clone(),
            self.core.root_handle(),
        );
        self.spawn_child(child);
    }

    pub fn show_tabbar(&self) {
        self.finish_children();
        self.switch_flow(AppFlow::Main);
        let child = TabbarCoordinator::new(
            self.core.navigation().clone(),
            self.factory.clone(),
            self.core.root_handle(),
        );
        self.spawn_child(child);
    }
}

impl Coordinator for AppCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if self.core.begin() {
            self.show_splash();
        }
    }

    fn exit_application(&self) {
        self.session_expired();
    }
}

impl RootFlow for AppCoordinator {
    fn session_expired(&self) {
        self.session.expire();
        if self.flow() == AppFlow::Auth {
            tracing::debug!("Session expired while already in the auth flow");
            return;
        }
        tracing::info!("Session expired; returning to login");
        self.show_login();
    }

    fn session_established(&self) {
        self.show_tabbar();
    }

    fn session_ended(&self) {
        tracing::info!(logged_in = self.session.is_logged_in(), "Session ended");
        self.show_login();
    }
}

impl std::fmt::Debug for AppCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCoordinator")
            .field("core", &self.core)
            .field("flow", &self.flow())
            .finish()
    }
}
