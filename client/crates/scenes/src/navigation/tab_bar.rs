//! Tab Bar Controller
//!
//! Four tabs, each with its own navigation stack.

use std::sync::Arc;

use parking_lot::RwLock;

use super::controller::NavigationController;

/// Main tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Today,
    Curriculum,
    ArticleCategory,
    Challenge,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Today,
        Tab::Curriculum,
        Tab::ArticleCategory,
        Tab::Challenge,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Tab::Today => "today",
            Tab::Curriculum => "curriculum",
            Tab::ArticleCategory => "article_category",
            Tab::Challenge => "challenge",
        }
    }

    const fn index(&self) -> usize {
        match self {
            Tab::Today => 0,
            Tab::Curriculum => 1,
            Tab::ArticleCategory => 2,
            Tab::Challenge => 3,
        }
    }
}

/// Tab container
pub struct TabBarController {
    navigations: [Arc<NavigationController>; 4],
    selected: RwLock<Tab>,
}

impl TabBarController {
    pub fn new() -> Self {
        Self {
            navigations: Tab::ALL.map(|tab| Arc::new(NavigationController::new(tab.label()))),
            selected: RwLock::new(Tab::Today),
        }
    }

    pub fn navigation(&self, tab: Tab) -> &Arc<NavigationController> {
        &self.navigations[tab.index()]
    }

    pub fn selected(&self) -> Tab {
        *self.selected.read()
    }

    pub fn select(&self, tab: Tab) {
        *self.selected.write() = tab;
        tracing::debug!(tab = tab.label(), "Tab selected");
    }
}

impl Default for TabBarController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TabBarController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabBarController")
            .field("selected", &self.selected())
            .finish()
    }
}
