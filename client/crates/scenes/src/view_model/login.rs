//! Login screen
//!
//! The host hands over the Kakao SDK access token; the view model exchanges
//! it for a session. A social account without a member record continues to
//! onboarding with the same Kakao token.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kernel::NetworkError;

use super::{EventLoop, ViewModel, bind, first_transform, opaque_debug, route_error};
use crate::manager::LoginManager;
use crate::navigator::LoginNavigation;
use crate::reactive::{CurrentValueSubject, DisposeBag, Publisher, Subject};

/// Error code the backend answers for an unregistered social account
pub const UNREGISTERED_MEMBER_CODE: &str = "404";

fn is_unregistered_member(error: &NetworkError) -> bool {
    matches!(error, NetworkError::Client { code, .. } if code == UNREGISTERED_MEMBER_CODE)
}

#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    /// Kakao access token obtained by the host
    pub kakao_login_succeeded: Subject<String>,
}

#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub is_loading: Publisher<bool>,
    pub error: Publisher<String>,
}

pub struct LoginViewModel {
    navigator: Arc<dyn LoginNavigation>,
    manager: Arc<dyn LoginManager>,
    in_flight: Arc<AtomicBool>,
    loading: CurrentValueSubject<bool>,
    errors: Subject<String>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl LoginViewModel {
    pub fn new(navigator: Arc<dyn LoginNavigation>, manager: Arc<dyn LoginManager>) -> Self {
        Self {
            navigator,
            manager,
            in_flight: Arc::new(AtomicBool::new(false)),
            loading: CurrentValueSubject::new(false),
            errors: Subject::new(),
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for LoginViewModel {
    type Input = LoginInput;
    type Output = LoginOutput;

    fn transform(&self, input: LoginInput) -> LoginOutput {
        if first_transform(&self.transformed, "login") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            let manager = self.manager.clone();
            let in_flight = self.in_flight.clone();
            let loading = self.loading.clone();
            let errors = self.errors.clone();
            bind(
                &mut event_loop,
                input.kakao_login_succeeded.events(),
                move |kakao_token: String| {
                    let navigator = navigator.clone();
                    let manager = manager.clone();
                    let in_flight = in_flight.clone();
                    let loading = loading.clone();
                    let errors = errors.clone();
                    async move {
                        if in_flight.swap(true, Ordering::AcqRel) {
                            tracing::debug!("Login already in flight; tap ignored");
                            return;
                        }
                        loading.send(true);
                        let result = manager.login(&kakao_token).await;
                        loading.send(false);
                        in_flight.store(false, Ordering::Release);

                        match result {
                            Ok(()) => navigator.login_completed(),
                            Err(error) if is_unregistered_member(&error) => {
                                tracing::info!("Unregistered social account; continuing to onboarding");
                                navigator.login_failed(kakao_token);
                            }
                            Err(error) => route_error(error, navigator.as_ref(), &errors),
                        }
                    }
                },
            );
            event_loop.run(&self.bag);
        }

        LoginOutput {
            is_loading: self.loading.publisher(),
            error: self.errors.publisher(),
        }
    }
}

opaque_debug!(LoginViewModel);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_member_detection() {
        assert!(is_unregistered_member(&NetworkError::client("404", "no member")));
        assert!(!is_unregistered_member(&NetworkError::client("400", "bad")));
        assert!(!is_unregistered_member(&NetworkError::Unauthorized));
    }
}
