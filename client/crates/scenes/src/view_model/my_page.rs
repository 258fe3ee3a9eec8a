//! My page screen: profile, logout and account deletion

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::MyPageProfile;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug, route_error};
use crate::manager::MyPageManager;
use crate::navigator::MyPageNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct MyPageInput {
    pub view_will_appear: Subject<()>,
    pub logout_tapped: Subject<()>,
    pub resign_tapped: Subject<()>,
    pub back_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct MyPageOutput {
    pub profile: Publisher<MyPageProfile>,
    pub error: Publisher<String>,
}

pub struct MyPageViewModel {
    navigator: Arc<dyn MyPageNavigation>,
    manager: Arc<dyn MyPageManager>,
    profile: Subject<MyPageProfile>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl MyPageViewModel {
    pub fn new(navigator: Arc<dyn MyPageNavigation>, manager: Arc<dyn MyPageManager>) -> Self {
        Self {
            navigator,
            manager,
            profile: Subject::new(),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for MyPageViewModel {
    type Input = MyPageInput;
    type Output = MyPageOutput;

    fn transform(&self, input: MyPageInput) -> MyPageOutput {
        if first_transform(&self.transformed, "my_page") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let profile = self.profile.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.view_will_appear.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let profile = profile.clone();
                let errors = errors.clone();
                async move {
                    match manager.profile().await {
                        Ok(loaded) => profile.send(loaded),
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.logout_tapped.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let errors = errors.clone();
                async move {
                    match manager.logout().await {
                        Ok(()) => navigator.logout_completed(),
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let errors = self.errors.clone();
            bind(&mut event_loop, input.resign_tapped.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let errors = errors.clone();
                async move {
                    match manager.resign().await {
                        Ok(()) => navigator.resign_completed(),
                        Err(error) => route_error(error, navigator.as_ref(), &errors),
                    }
                }
            });

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.back_button_tapped.events(), move |()| {
                navigator.back_button_tapped();
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        MyPageOutput {
            profile: self.profile.publisher(),
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(MyPageViewModel);
