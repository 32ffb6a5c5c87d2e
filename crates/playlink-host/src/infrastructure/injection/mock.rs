//! Mock OS injection boundary for unit testing.
//!
//! The real injector synthesizes input on the machine running the tests
//! (the cursor actually moves, keys actually fire) and its effects cannot be
//! observed from Rust test code. The mocks replace both OS boundaries with
//! in-memory state:
//!
//! - [`MockInjector`] records every descriptor passed to `inject` in a
//!   `Mutex<Vec<..>>` so assertions can inspect exactly what would have been
//!   injected, and in what order.
//! - [`MockKeyStates`] is a scriptable key-state table, letting tests drive
//!   the guard into both the permit and reject branches deterministically.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::inject_input::{InputInjector, KeyStateProbe, SyntheticEvent};

/// Records injection descriptors instead of performing OS calls.
pub struct MockInjector {
    injected: Mutex<Vec<SyntheticEvent>>,
    /// Count `inject` reports back; 1 mimics full acceptance, 0 mimics the
    /// OS refusing the event.
    accepted_count: u32,
}

impl MockInjector {
    /// An injector that accepts every event.
    pub fn new() -> Self {
        Self {
            injected: Mutex::new(Vec::new()),
            accepted_count: 1,
        }
    }

    /// An injector that reports every event as refused (count 0) while
    /// still recording it, for exercising the logged-and-dropped path.
    pub fn rejecting() -> Self {
        Self {
            injected: Mutex::new(Vec::new()),
            accepted_count: 0,
        }
    }

    /// A copy of everything injected so far, in call order.
    pub fn injected(&self) -> Vec<SyntheticEvent> {
        self.injected.lock().unwrap().clone()
    }
}

impl Default for MockInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputInjector for MockInjector {
    fn inject(&self, event: &SyntheticEvent) -> u32 {
        self.injected.lock().unwrap().push(*event);
        self.accepted_count
    }
}

/// Scriptable live key-state table.
///
/// Every key defaults to "up"; tests flip individual keys with
/// [`set_pressed`](Self::set_pressed).
#[derive(Default)]
pub struct MockKeyStates {
    pressed: Mutex<HashMap<u16, bool>>,
}

impl MockKeyStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the live state the probe will report for `vk`.
    pub fn set_pressed(&self, vk: u16, pressed: bool) {
        self.pressed.lock().unwrap().insert(vk, pressed);
    }
}

impl KeyStateProbe for MockKeyStates {
    fn is_pressed(&self, vk: u16) -> bool {
        self.pressed.lock().unwrap().get(&vk).copied().unwrap_or(false)
    }
}
