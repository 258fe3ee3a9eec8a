//! Onboarding completion screen

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use auth::UserOnboardingModel;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug};
use crate::navigator::CompleteOnboardingNavigation;
use crate::reactive::{CurrentValueSubject, DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct CompleteOnboardingInput {
    pub start_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct CompleteOnboardingOutput {
    pub fetal_nickname: Publisher<String>,
}

pub struct CompleteOnboardingViewModel {
    navigator: Arc<dyn CompleteOnboardingNavigation>,
    fetal_nickname: CurrentValueSubject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl CompleteOnboardingViewModel {
    pub fn new(navigator: Arc<dyn CompleteOnboardingNavigation>, model: UserOnboardingModel) -> Self {
        Self {
            navigator,
            fetal_nickname: CurrentValueSubject::new(model.fetal_nickname.as_str().to_string()),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for CompleteOnboardingViewModel {
    type Input = CompleteOnboardingInput;
    type Output = CompleteOnboardingOutput;

    fn transform(&self, input: CompleteOnboardingInput) -> CompleteOnboardingOutput {
        if first_transform(&self.transformed, "complete_onboarding") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.start_button_tapped.events(), move |()| {
                navigator.start_button_tapped();
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        CompleteOnboardingOutput {
            fetal_nickname: self.fetal_nickname.publisher(),
        }
    }
}

opaque_debug!(CompleteOnboardingViewModel);
