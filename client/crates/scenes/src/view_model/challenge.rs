//! Challenge tab screen
//!
//! Shows the member's attendance streak. A member with no progress yet gets
//! an empty board rather than an error.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::ChallengeData;

use super::{
    EventLoop, NavigationFlow, ViewModel, bind, first_transform, navigate, opaque_debug,
    route_error,
};
use crate::manager::ChallengeManager;
use crate::navigator::ChallengeNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct ChallengeInput {
    pub view_will_appear: Subject<()>,
    pub navigation_left_button_tapped: Subject<()>,
    pub navigation_right_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct ChallengeOutput {
    pub challenge_data: Publisher<ChallengeData>,
    pub navigation_flow: Publisher<NavigationFlow>,
    pub error: Publisher<String>,
}

pub struct ChallengeViewModel {
    navigator: Arc<dyn ChallengeNavigation>,
    manager: Arc<dyn ChallengeManager>,
    challenge_data: Subject<ChallengeData>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl ChallengeViewModel {
    pub fn new(navigator: Arc<dyn ChallengeNavigation>, manager: Arc<dyn ChallengeManager>) -> Self {
        Self {
            navigator,
            manager,
            challenge_data: Subject::new(),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for ChallengeViewModel {
    type Input = ChallengeInput;
    type Output = ChallengeOutput;

    fn transform(&self, input: ChallengeInput) -> ChallengeOutput {
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

        if first_transform(&self.transformed, "challenge") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            bind(&mut event_loop, navigation_flow.events(), move |flow| {
                navigate(flow, navigator.as_ref());
                std::future::ready(())
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let challenge_data = self.challenge_data.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.view_will_appear.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let challenge_data = challenge_data.clone();
                let errors = errors.clone();
                async move {
                    match manager.challenge_progress().await {
                        Ok(progress) => {
                            challenge_data.send(progress.unwrap_or_else(ChallengeData::empty))
                        }
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });
            event_loop.run(&self.bag);
        }

        ChallengeOutput {
            challenge_data: self.challenge_data.publisher(),
            navigation_flow,
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(ChallengeViewModel);
