//! Coordinator Tree
//!
//! A coordinator owns one navigation flow. It pushes screens built by the
//! scene factory, spawns child coordinators for sub-flows and releases them
//! when they finish.
//!
//! ## Ownership
//! - Parents hold their children strongly; children hold a weak back-reference
//! - Screens reach their coordinator through an adaptor holding a weak handle
//! - The root flow handler ([`RootFlow`]) is held weakly by every node
//!
//! ## Lifecycle
//! `Inactive -> Started -> Finished`. `finish` first finishes the children
//! (newest first), then undoes this coordinator's navigation, then tells the
//! parent. No lock is held while calling out to another coordinator.

pub mod app;
pub mod article;
pub mod article_category;
pub mod auth;
pub mod bookmark;
pub mod challenge;
pub mod curriculum;
pub mod my_page;
pub mod tabbar;
pub mod today;

use std::sync::{Arc, Weak};

use kernel::id::CoordinatorId;
use parking_lot::Mutex;

use crate::factory::SceneFactory;
use crate::navigation::{NavigationController, Screen};

pub use app::AppCoordinator;
pub use article::ArticleCoordinator;
pub use article_category::ArticleCategoryCoordinator;
pub use auth::AuthCoordinator;
pub use bookmark::BookmarkCoordinator;
pub use challenge::ChallengeCoordinator;
pub use curriculum::CurriculumCoordinator;
pub use my_page::MyPageCoordinator;
pub use tabbar::TabbarCoordinator;
pub use today::TodayCoordinator;

// ============================================================================
// Root flow
// ============================================================================

/// Application-level flow switches, implemented by the root coordinator
pub trait RootFlow: Send + Sync {
    /// The session could not be recovered; back to login
    fn session_expired(&self);

    /// Login or signup finished
    fn session_established(&self);

    /// The member logged out or resigned
    fn session_ended(&self);
}

// ============================================================================
// Core state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Inactive,
    Started,
    Finished,
}

struct Lifecycle {
    state: CoordinatorState,
    base_depth: usize,
    parent: Option<Weak<dyn Coordinator>>,
}

/// Bookkeeping shared by every coordinator
pub struct CoordinatorCore {
    id: CoordinatorId,
    name: &'static str,
    navigation: Arc<NavigationController>,
    root: Weak<dyn RootFlow>,
    lifecycle: Mutex<Lifecycle>,
    children: Mutex<Vec<Arc<dyn Coordinator>>>,
}

impl CoordinatorCore {
    pub fn new(
        name: &'static str,
        navigation: Arc<NavigationController>,
        root: Weak<dyn RootFlow>,
    ) -> Self {
        Self {
            id: CoordinatorId::new(),
            name,
            navigation,
            root,
            lifecycle: Mutex::new(Lifecycle {
                state: CoordinatorState::Inactive,
                base_depth: 0,
                parent: None,
            }),
            children: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> CoordinatorId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn navigation(&self) -> &Arc<NavigationController> {
        &self.navigation
    }

    /// Weak root handle to hand to child coordinators
    pub fn root_handle(&self) -> Weak<dyn RootFlow> {
        self.root.clone()
    }

    pub fn root(&self) -> Option<Arc<dyn RootFlow>> {
        self.root.upgrade()
    }

    pub fn state(&self) -> CoordinatorState {
        self.lifecycle.lock().state
    }

    /// Stack depth below this coordinator's own root screen
    pub fn base_depth(&self) -> usize {
        self.lifecycle.lock().base_depth
    }

    pub fn parent(&self) -> Option<Arc<dyn Coordinator>> {
        self.lifecycle.lock().parent.as_ref().and_then(Weak::upgrade)
    }

    fn set_parent(&self, parent: Weak<dyn Coordinator>) {
        self.lifecycle.lock().parent = Some(parent);
    }

    /// `Inactive -> Started`; false if the coordinator already ran
    pub fn begin(&self) -> bool {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.state != CoordinatorState::Inactive {
            tracing::warn!(
                coordinator = self.name,
                state = ?lifecycle.state,
                "Coordinator started twice; ignored"
            );
            return false;
        }
        lifecycle.state = CoordinatorState::Started;
        tracing::debug!(coordinator = self.name, id = %self.id, "Coordinator started");
        true
    }

    /// Record the current top screen as this coordinator's root screen
    pub fn anchor(&self) {
        let depth = self.navigation.depth().saturating_sub(1);
        self.lifecycle.lock().base_depth = depth;
    }

    /// Push `screen` and anchor the coordinator on it
    pub fn push_root(&self, screen: Screen) {
        self.navigation.push(screen);
        self.anchor();
    }

    /// Replace the whole stack with `screen` and anchor on it
    pub fn set_root(&self, screen: Screen) {
        self.navigation.set_root(screen);
        self.anchor();
    }

    fn mark_finished(&self) -> bool {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.state == CoordinatorState::Finished {
            return false;
        }
        lifecycle.state = CoordinatorState::Finished;
        true
    }
}

impl std::fmt::Debug for CoordinatorCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorCore")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state())
            .field("children", &self.children.lock().len())
            .finish()
    }
}

// ============================================================================
// Coordinator
// ============================================================================

/// One node of the navigation tree
pub trait Coordinator: Send + Sync {
    fn core(&self) -> &CoordinatorCore;

    /// Weak handle to this coordinator as a tree node
    fn handle(&self) -> Weak<dyn Coordinator>;

    /// Show the flow's first screen
    fn start(&self);

    /// Undo this coordinator's own navigation changes
    fn tear_down(&self) {
        let core = self.core();
        core.navigation().pop_to(core.base_depth());
    }

    fn id(&self) -> CoordinatorId {
        self.core().id()
    }

    fn name(&self) -> &'static str {
        self.core().name()
    }

    fn state(&self) -> CoordinatorState {
        self.core().state()
    }

    fn children(&self) -> Vec<Arc<dyn Coordinator>> {
        self.core().children.lock().clone()
    }

    fn add_child(&self, child: Arc<dyn Coordinator>) {
        child.core().set_parent(self.handle());
        tracing::debug!(
            parent = self.name(),
            child = child.name(),
            "Child coordinator added"
        );
        self.core().children.lock().push(child);
    }

    /// Attach `child` and start it
    fn spawn_child(&self, child: Arc<dyn Coordinator>) {
        self.add_child(child.clone());
        child.start();
    }

    /// Release a finished child; unknown ids are ignored
    fn child_finished(&self, child_id: CoordinatorId) {
        let removed = {
            let mut children = self.core().children.lock();
            children
                .iter()
                .position(|child| child.id() == child_id)
                .map(|index| children.remove(index))
        };
        match removed {
            Some(child) => tracing::debug!(
                parent = self.name(),
                child = child.name(),
                "Child coordinator released"
            ),
            None => tracing::debug!(
                parent = self.name(),
                child = %child_id,
                "Unknown child coordinator; ignored"
            ),
        }
    }

    /// Finish every child, newest first
    fn finish_children(&self) {
        let children = std::mem::take(&mut *self.core().children.lock());
        for child in children.into_iter().rev() {
            child.finish();
        }
    }

    /// End this flow and detach from the parent; runs at most once
    fn finish(&self) {
        let core = self.core();
        if !core.mark_finished() {
            return;
        }
        self.finish_children();
        self.tear_down();
        tracing::debug!(coordinator = core.name(), id = %core.id(), "Coordinator finished");
        if let Some(parent) = core.parent() {
            parent.child_finished(core.id());
        }
    }

    /// Back navigation: pop inside the flow, or finish it at its root screen
    fn pop(&self) {
        let core = self.core();
        if core.navigation().pop_above(core.base_depth() + 1).is_none() {
            self.finish();
        }
    }

    /// Session is unrecoverable; hand over to the root flow
    fn exit_application(&self) {
        match self.core().root() {
            Some(root) => root.session_expired(),
            None => tracing::warn!(coordinator = self.name(), "Root flow already released"),
        }
    }
}

// ============================================================================
// Shared sub-flows
// ============================================================================

/// Present an article detail flow under `parent`
///
/// An article already presented by `parent` is closed first.
pub(crate) fn spawn_article(
    parent: &dyn Coordinator,
    factory: &Arc<dyn SceneFactory>,
    article_id: content::models::ArticleId,
) {
    for open in parent
        .children()
        .into_iter()
        .filter(|child| child.name() == ArticleCoordinator::NAME)
    {
        tracing::debug!(parent = parent.name(), "Closing the article on screen");
        open.finish();
    }

    let core = parent.core();
    let child = ArticleCoordinator::new(
        core.navigation().clone(),
        factory.clone(),
        core.root_handle(),
        article_id,
    );
    parent.spawn_child(child);
}

/// Push the bookmark flow under `parent`
pub(crate) fn spawn_bookmark(parent: &dyn Coordinator, factory: &Arc<dyn SceneFactory>) {
    let core = parent.core();
    let child = BookmarkCoordinator::new(
        core.navigation().clone(),
        factory.clone(),
        core.root_handle(),
    );
    parent.spawn_child(child);
}

/// Push the my-page flow under `parent`
pub(crate) fn spawn_my_page(parent: &dyn Coordinator, factory: &Arc<dyn SceneFactory>) {
    let core = parent.core();
    let child = MyPageCoordinator::new(
        core.navigation().clone(),
        factory.clone(),
        core.root_handle(),
    );
    parent.spawn_child(child);
}
