//! Main tab flow
//!
//! Installs the tab container as the window root and runs one coordinator per
//! tab, each on that tab's own navigation stack.

use std::sync::{Arc, Weak};

use super::{
    ArticleCategoryCoordinator, ChallengeCoordinator, Coordinator, CoordinatorCore,
    CurriculumCoordinator, RootFlow, TodayCoordinator,
};
use crate::factory::SceneFactory;
use crate::navigation::{NavigationController, Scene, Screen, Tab, TabBarController};

pub struct TabbarCoordinator {
    core: CoordinatorCore,
    this: Weak<Self>,
    factory: Arc<dyn SceneFactory>,
    tab_bar: Arc<TabBarController>,
}

impl TabbarCoordinator {
    pub fn new(
        navigation: Arc<NavigationController>,
        factory: Arc<dyn SceneFactory>,
        root: Weak<dyn RootFlow>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            core: CoordinatorCore::new("tabbar", navigation, root),
            this: this.clone(),
            factory,
            tab_bar: Arc::new(TabBarController::new()),
        })
    }

    pub fn tab_bar(&self) -> &Arc<TabBarController> {
        &self.tab_bar
    }

    fn make_tab(&self, tab: Tab) -> Arc<dyn Coordinator> {
        let navigation = self.tab_bar.navigation(tab).clone();
        let factory = self.factory.clone();
        let root = self.core.root_handle();
        match tab {
            Tab::Today => TodayCoordinator::new(navigation, factory, root) as Arc<dyn Coordinator>,
            Tab::Curriculum => CurriculumCoordinator::new(navigation, factory, root),
            Tab::ArticleCategory => ArticleCategoryCoordinator::new(navigation, factory, root),
            Tab::Challenge => ChallengeCoordinator::new(navigation, factory, root),
        }
    }
}

impl Coordinator for TabbarCoordinator {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn handle(&self) -> Weak<dyn Coordinator> {
        self.this.clone()
    }

    fn start(&self) {
        if !self.core.begin() {
            return;
        }
        self.core
            .set_root(Screen::new(Scene::TabBar(self.tab_bar.clone())));
        for tab in Tab::ALL {
            self.spawn_child(self.make_tab(tab));
        }
        self.tab_bar.select(Tab::Today);
    }
}
