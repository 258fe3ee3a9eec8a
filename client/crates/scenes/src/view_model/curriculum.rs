//! Curriculum tab screen

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::UserInfoData;

use super::{
    EventLoop, NavigationFlow, ViewModel, bind, first_transform, navigate, opaque_debug,
    route_error,
};
use crate::manager::CurriculumManager;
use crate::navigator::CurriculumNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct CurriculumInput {
    pub view_will_appear: Subject<()>,
    /// Week row tapped in the curriculum overview
    pub week_tapped: Subject<u8>,
    pub navigation_left_button_tapped: Subject<()>,
    pub navigation_right_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct CurriculumOutput {
    pub user_info: Publisher<UserInfoData>,
    pub navigation_flow: Publisher<NavigationFlow>,
    pub error: Publisher<String>,
}

pub struct CurriculumViewModel {
    navigator: Arc<dyn CurriculumNavigation>,
    manager: Arc<dyn CurriculumManager>,
    user_info: Subject<UserInfoData>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl CurriculumViewModel {
    pub fn new(
        navigator: Arc<dyn CurriculumNavigation>,
        manager: Arc<dyn CurriculumManager>,
    ) -> Self {
        Self {
            navigator,
            manager,
            user_info: Subject::new(),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for CurriculumViewModel {
    type Input = CurriculumInput;
    type Output = CurriculumOutput;

    fn transform(&self, input: CurriculumInput) -> CurriculumOutput {
        let navigation_flow = input
            .navigation_left_button_tapped
            .publisher()
            .map(|()| NavigationFlow::BookmarkButtonTapped)
            .merge(
                &input
                    .navigation_right_button_tapped
                    .publisher()
                    .map(|()| NavigationFlow::MyPageButtonTapped),
            );

        if first_transform(&self.transformed, "curriculum") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            bind(&mut event_loop, navigation_flow.events(), move |flow| {
                navigate(flow, navigator.as_ref());
                std::future::ready(())
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let user_info = self.user_info.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.view_will_appear.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let user_info = user_info.clone();
                let errors = errors.clone();
                async move {
                    match manager.progress().await {
                        Ok(info) => user_info.send(info),
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.week_tapped.events(), move |week| {
                navigator.article_list_by_week_tapped(week);
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        CurriculumOutput {
            user_info: self.user_info.publisher(),
            navigation_flow,
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(CurriculumViewModel);
