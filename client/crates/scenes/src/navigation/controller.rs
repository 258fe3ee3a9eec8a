//! Navigation Controller
//!
//! A stack of screens plus at most one presented modal. All mutation happens
//! under the stack lock; events are broadcast after it is released.

use kernel::id::ScreenId;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use super::Screen;

const EVENT_CAPACITY: usize = 128;

/// Stack change notification for the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Pushed {
        controller: &'static str,
        screen: ScreenId,
        scene: &'static str,
    },
    Popped {
        controller: &'static str,
        screen: ScreenId,
        scene: &'static str,
    },
    PoppedTo {
        controller: &'static str,
        depth: usize,
    },
    RootReplaced {
        controller: &'static str,
        screen: ScreenId,
        scene: &'static str,
    },
    Presented {
        controller: &'static str,
        screen: ScreenId,
        scene: &'static str,
    },
    Dismissed {
        controller: &'static str,
        screen: ScreenId,
    },
}

#[derive(Default)]
struct NavigationStack {
    screens: Vec<Screen>,
    presented: Option<Screen>,
}

/// Screen stack handle shared by the coordinators of one navigation area
pub struct NavigationController {
    label: &'static str,
    stack: Mutex<NavigationStack>,
    events: broadcast::Sender<NavigationEvent>,
}

impl NavigationController {
    pub fn new(label: &'static str) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            label,
            stack: Mutex::new(NavigationStack::default()),
            events,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: NavigationEvent) {
        tracing::debug!(?event, "Navigation");
        let _ = self.events.send(event);
    }

    // ========================================================================
    // Stack
    // ========================================================================

    pub fn push(&self, screen: Screen) {
        let event = NavigationEvent::Pushed {
            controller: self.label,
            screen: screen.id,
            scene: screen.name(),
        };
        self.stack.lock().screens.push(screen);
        self.emit(event);
    }

    /// Pop the top screen; the root screen is never popped
    pub fn pop(&self) -> Option<Screen> {
        self.pop_above(1)
    }

    /// Pop the top screen only while more than `depth` screens remain
    pub fn pop_above(&self, depth: usize) -> Option<Screen> {
        let popped = {
            let mut stack = self.stack.lock();
            if stack.screens.len() <= depth.max(1) {
                return None;
            }
            stack.screens.pop()
        };
        if let Some(screen) = &popped {
            self.emit(NavigationEvent::Popped {
                controller: self.label,
                screen: screen.id,
                scene: screen.name(),
            });
        }
        popped
    }

    /// Truncate the stack to `depth` screens, returning the removed ones
    pub fn pop_to(&self, depth: usize) -> Vec<Screen> {
        let removed = {
            let mut stack = self.stack.lock();
            if stack.screens.len() <= depth {
                return Vec::new();
            }
            stack.screens.split_off(depth)
        };
        self.emit(NavigationEvent::PoppedTo {
            controller: self.label,
            depth,
        });
        removed
    }

    /// Replace the whole stack with `screen`
    pub fn set_root(&self, screen: Screen) {
        let event = NavigationEvent::RootReplaced {
            controller: self.label,
            screen: screen.id,
            scene: screen.name(),
        };
        let replaced = {
            let mut stack = self.stack.lock();
            let presented = stack.presented.take();
            let screens = std::mem::replace(&mut stack.screens, vec![screen]);
            (screens, presented)
        };
        self.emit(event);
        // Old screens (and their view models) drop outside the lock
        drop(replaced);
    }

    pub fn depth(&self) -> usize {
        self.stack.lock().screens.len()
    }

    pub fn top(&self) -> Option<Screen> {
        self.stack.lock().screens.last().cloned()
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.stack.lock().screens.clone()
    }

    // ========================================================================
    // Modal
    // ========================================================================

    /// Present `screen` modally, replacing any presented screen
    pub fn present(&self, screen: Screen) {
        let event = NavigationEvent::Presented {
            controller: self.label,
            screen: screen.id,
            scene: screen.name(),
        };
        let previous = self.stack.lock().presented.replace(screen);
        self.emit(event);
        drop(previous);
    }

    pub fn dismiss(&self) -> Option<Screen> {
        let dismissed = self.stack.lock().presented.take();
        if let Some(screen) = &dismissed {
            self.emit(NavigationEvent::Dismissed {
                controller: self.label,
                screen: screen.id,
            });
        }
        dismissed
    }

    pub fn presented(&self) -> Option<Screen> {
        self.stack.lock().presented.clone()
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stack = self.stack.lock();
        f.debug_struct("NavigationController")
            .field("label", &self.label)
            .field(
                "screens",
                &stack.screens.iter().map(Screen::name).collect::<Vec<_>>(),
            )
            .field("presented", &stack.presented.as_ref().map(Screen::name))
            .finish()
    }
}
