//! Scenes - Navigation and presentation logic
//!
//! Structure:
//! - `coordinator/` - The coordinator tree: one node per navigation flow
//! - `navigator/` - Per-screen navigation capabilities and their adaptors
//! - `view_model/` - Per-screen `transform(input) -> output` logic
//! - `manager/` - Narrow async façades the view models call
//! - `factory/` - Screen construction, wiring all of the above
//! - `navigation/` - Render-agnostic navigation stacks the host UI observes
//! - `reactive` - Subjects, publishers and task ownership
//!
//! ## Session expiry
//! Any view model that sees `Unauthorized` (after the transport already tried
//! a reissue) calls its navigator's `check_token_is_expired`. The adaptor
//! forwards to its coordinator, and every coordinator forwards to the single
//! [`RootFlow`] handler, which clears the session and shows login.

pub mod coordinator;
pub mod factory;
pub mod manager;
pub mod navigation;
pub mod navigator;
pub mod reactive;
pub mod view_model;

// Re-exports for convenience
pub use coordinator::app::AppFlow;
pub use coordinator::{
    AppCoordinator, Coordinator, CoordinatorCore, CoordinatorState, RootFlow,
};
pub use factory::{LiveSceneFactory, SceneFactory};
pub use manager::SessionControl;
pub use navigation::{NavigationController, NavigationEvent, Scene, Screen, Tab, TabBarController};
pub use reactive::{CurrentValueSubject, DisposeBag, Publisher, Subject};
pub use view_model::{NavigationFlow, ViewModel};
