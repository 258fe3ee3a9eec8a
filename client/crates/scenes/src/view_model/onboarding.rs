//! Onboarding screen
//!
//! Two pages share one screen: pregnancy weeks, then the fetal nickname.
//! "Next" on the first page moves to the second; "next" on the second signs
//! up. "Back" on the second page returns to the first, on the first page it
//! leaves the screen.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use auth::OnboardingDraft;
use auth::models::{FetalNickname, PregnancyWeeks};
use parking_lot::Mutex;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug, route_error};
use crate::manager::OnboardingManager;
use crate::navigator::OnboardingNavigation;
use crate::reactive::{CurrentValueSubject, DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingPage {
    Pregnancy,
    FetalNickname,
}

/// Page transition announced to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingFlow {
    ToPregnancy,
    ToFetalNickname,
    SignUp,
}

#[derive(Debug, Clone, Default)]
pub struct OnboardingInput {
    pub pregnancy_weeks: Subject<String>,
    pub fetal_nickname: Subject<String>,
    pub next_button_tapped: Subject<()>,
    pub back_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct OnboardingOutput {
    pub pregnancy_button_enabled: Publisher<bool>,
    pub fetal_button_enabled: Publisher<bool>,
    pub page: Publisher<OnboardingPage>,
    pub onboarding_flow: Publisher<OnboardingFlow>,
    pub error: Publisher<String>,
}

pub struct OnboardingViewModel {
    navigator: Arc<dyn OnboardingNavigation>,
    manager: Arc<dyn OnboardingManager>,
    draft: Arc<Mutex<OnboardingDraft>>,
    page: CurrentValueSubject<OnboardingPage>,
    pregnancy_enabled: Subject<bool>,
    fetal_enabled: Subject<bool>,
    flow: Subject<OnboardingFlow>,
    errors: Subject<String>,
    in_flight: Arc<AtomicBool>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl OnboardingViewModel {
    pub fn new(
        navigator: Arc<dyn OnboardingNavigation>,
        manager: Arc<dyn OnboardingManager>,
        kakao_access_token: String,
    ) -> Self {
        Self {
            navigator,
            manager,
            draft: Arc::new(Mutex::new(OnboardingDraft::for_kakao_token(
                kakao_access_token,
            ))),
            page: CurrentValueSubject::new(OnboardingPage::Pregnancy),
            pregnancy_enabled: Subject::new(),
            fetal_enabled: Subject::new(),
            flow: Subject::new(),
            errors: Subject::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }

    pub fn draft(&self) -> OnboardingDraft {
        self.draft.lock().clone()
    }

    fn bind_fields(&self, input: &OnboardingInput, event_loop: &mut EventLoop) {
        let draft = self.draft.clone();
        let enabled = self.pregnancy_enabled.clone();
        bind(event_loop, input.pregnancy_weeks.events(), move |text: String| {
            let weeks = PregnancyWeeks::parse(&text).ok();
            let valid = weeks.is_some();
            draft.lock().pregnancy_weeks = weeks;
            enabled.send(valid);
            std::future::ready(())
        });

        let draft = self.draft.clone();
        let enabled = self.fetal_enabled.clone();
        bind(event_loop, input.fetal_nickname.events(), move |text: String| {
            let nickname = FetalNickname::new(&text).ok();
            let valid = nickname.is_some();
            draft.lock().fetal_nickname = nickname;
            enabled.send(valid);
            std::future::ready(())
        });
    }

    fn bind_next(&self, input: &OnboardingInput, event_loop: &mut EventLoop) {
        let navigator = self.navigator.clone();
        let manager = self.manager.clone();
        let draft = self.draft.clone();
        let page = self.page.clone();
        let flow = self.flow.clone();
        let errors = self.errors.clone();
        let in_flight = self.in_flight.clone();
        bind(event_loop, input.next_button_tapped.events(), move |()| {
            let navigator = navigator.clone();
            let manager = manager.clone();
            let draft = draft.clone();
            let page = page.clone();
            let flow = flow.clone();
            let errors = errors.clone();
            let in_flight = in_flight.clone();
            async move {
                match page.value() {
                    OnboardingPage::Pregnancy => {
                        if draft.lock().pregnancy_weeks.is_none() {
                            tracing::debug!("Pregnancy weeks not valid yet; next ignored");
                            return;
                        }
                        page.send(OnboardingPage::FetalNickname);
                        flow.send(OnboardingFlow::ToFetalNickname);
                    }
                    OnboardingPage::FetalNickname => {
                        if in_flight.swap(true, Ordering::AcqRel) {
                            tracing::debug!("Signup already in flight; tap ignored");
                            return;
                        }
                        flow.send(OnboardingFlow::SignUp);
                        let snapshot = draft.lock().clone();
                        let result = manager.sign_up(&snapshot).await;
                        in_flight.store(false, Ordering::Release);

                        match result {
                            Ok(model) => navigator.onboarding_completed(model),
                            Err(error) => route_error(error, navigator.as_ref(), &errors),
                        }
                    }
                }
            }
        });
    }

    fn bind_back(&self, input: &OnboardingInput, event_loop: &mut EventLoop) {
        let navigator = self.navigator.clone();
        let page = self.page.clone();
        let flow = self.flow.clone();
        bind(event_loop, input.back_button_tapped.events(), move |()| {
            match page.value() {
                OnboardingPage::FetalNickname => {
                    page.send(OnboardingPage::Pregnancy);
                    flow.send(OnboardingFlow::ToPregnancy);
                }
                OnboardingPage::Pregnancy => navigator.back_button_tapped(),
            }
            std::future::ready(())
        });
    }
}

impl ViewModel for OnboardingViewModel {
    type Input = OnboardingInput;
    type Output = OnboardingOutput;

    fn transform(&self, input: OnboardingInput) -> OnboardingOutput {
        if first_transform(&self.transformed, "onboarding") {
            let mut event_loop = EventLoop::new();
            self.bind_fields(&input, &mut event_loop);
            self.bind_next(&input, &mut event_loop);
            self.bind_back(&input, &mut event_loop);
            event_loop.run(&self.bag);
        }

        OnboardingOutput {
            pregnancy_button_enabled: self.pregnancy_enabled.publisher(),
            fetal_button_enabled: self.fetal_enabled.publisher(),
            page: self.page.publisher(),
            onboarding_flow: self.flow.publisher(),
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(OnboardingViewModel);
