//! Splash screen: validates the stored session on launch

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use auth::TokenState;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug};
use crate::manager::SplashManager;
use crate::navigator::SplashNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct SplashInput {
    pub view_did_load: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct SplashOutput {
    pub token_state: Publisher<TokenState>,
}

pub struct SplashViewModel {
    navigator: Arc<dyn SplashNavigation>,
    manager: Arc<dyn SplashManager>,
    token_state: Subject<TokenState>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl SplashViewModel {
    pub fn new(navigator: Arc<dyn SplashNavigation>, manager: Arc<dyn SplashManager>) -> Self {
        Self {
            navigator,
            manager,
            token_state: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for SplashViewModel {
    type Input = SplashInput;
    type Output = SplashOutput;

    fn transform(&self, input: SplashInput) -> SplashOutput {
        if first_transform(&self.transformed, "splash") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let token_state = self.token_state.clone();
            bind(&mut event_loop, input.view_did_load.events(), move |()| {
                let navigator = navigator.clone();
                let manager = manager.clone();
                let token_state = token_state.clone();
                async move {
                    let state = manager.check_token().await;
                    tracing::info!(?state, "Launch token check finished");
                    token_state.send(state);
                    navigator.check_token(state);
                }
            });
            event_loop.run(&self.bag);
        }

        SplashOutput {
            token_state: self.token_state.publisher(),
        }
    }
}

opaque_debug!(SplashViewModel);
