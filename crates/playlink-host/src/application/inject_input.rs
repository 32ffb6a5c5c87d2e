//! Translates abstract mouse and keyboard events into OS injection
//! descriptors, guarded against desynchronized key state.
//!
//! The client's event stream reports *transitions* (press/release), but the
//! host OS tracks *state*. If a release event arrives for a key the OS does
//! not consider held (a dropped packet, a stream replayed out of order, a
//! key the local user already released), injecting it anyway leaves the two
//! ends disagreeing about what is pressed. The [`KeyStateGuard`] reads the
//! live key state before every press/release injection and drops events
//! whose precondition does not hold.
//!
//! The guard is best-effort: the state read and the injection are two
//! separate OS calls with a race window in between. That race is accepted
//! because each session delivers a single ordered event stream, so no second
//! writer competes for the same key between the two calls.
//!
//! The actual OS calls are made by an [`InputInjector`] / [`KeyStateProbe`]
//! implementation injected at construction time; the platform-specific
//! implementations are in the infrastructure layer.

use std::sync::Arc;

use playlink_core::{keys, MouseButton};
use tracing::warn;

/// One structured event descriptor for the OS injection boundary.
///
/// Exactly one descriptor is handed to [`InputInjector::inject`] per call;
/// there is no batching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticEvent {
    /// Relative cursor motion in mickeys.
    MouseMove { dx: i32, dy: i32 },
    /// A mouse button transition.
    MouseButton { button: MouseButton, release: bool },
    /// Vertical wheel rotation; positive is away from the user.
    Wheel { distance: i32 },
    /// A keyboard key transition.
    Key {
        /// Virtual key, already normalized via [`keys::normalize`].
        vk: u16,
        /// When `true` the key is injected by scan code (looked up from
        /// `vk` at the OS boundary); otherwise by virtual key.
        by_scan_code: bool,
        /// Whether the event must carry the extended-key flag.
        extended: bool,
        release: bool,
    },
}

/// OS synthetic-input boundary.
///
/// Accepts one event descriptor and returns how many events the OS actually
/// accepted (the contract of `SendInput`). Callers compare the count to 1
/// and log on mismatch; a dropped event is never retried.
pub trait InputInjector: Send + Sync {
    fn inject(&self, event: &SyntheticEvent) -> u32;
}

/// OS live key-state boundary.
///
/// Reads the asynchronous key state for a virtual key: `true` means the OS
/// currently considers the key held down.
pub trait KeyStateProbe: Send + Sync {
    fn is_pressed(&self, vk: u16) -> bool;
}

/// Best-effort consistency check run before every press/release injection.
pub struct KeyStateGuard {
    probe: Arc<dyn KeyStateProbe>,
}

impl KeyStateGuard {
    pub fn new(probe: Arc<dyn KeyStateProbe>) -> Self {
        Self { probe }
    }

    /// Decides whether a press/release of `vk` may be injected.
    ///
    /// A press is permitted only while the key is up, a release only while
    /// it is down. A transition whose precondition does not hold would be a
    /// duplicate press or a no-op release, evidence that the stream and
    /// the OS have diverged, so it is dropped with a warning instead.
    pub fn permits(&self, vk: u16, release: bool) -> bool {
        let held = self.probe.is_pressed(vk);
        if held == release {
            return true;
        }
        warn!(
            held,
            release,
            "live state of vkey [{vk:#04x}] does not match the desired transition, dropping event"
        );
        false
    }
}

/// Stateless mapping from abstract input events to injection descriptors.
///
/// Mouse motion and wheel events translate directly; button and key events
/// pass through the [`KeyStateGuard`] first. All operations are
/// fire-and-forget: failures are logged and the event is dropped.
pub struct EventTranslator {
    injector: Arc<dyn InputInjector>,
    guard: KeyStateGuard,
}

impl EventTranslator {
    pub fn new(injector: Arc<dyn InputInjector>, probe: Arc<dyn KeyStateProbe>) -> Self {
        Self {
            injector,
            guard: KeyStateGuard::new(probe),
        }
    }

    /// Injects relative cursor motion. Motion has no press/release state,
    /// so no guard check applies.
    pub fn move_mouse(&self, dx: i32, dy: i32) {
        self.send(SyntheticEvent::MouseMove { dx, dy }, "mouse motion");
    }

    /// Injects a mouse button transition after the guard check.
    pub fn button_mouse(&self, button: MouseButton, release: bool) {
        if !self.guard.permits(button.virtual_key(), release) {
            return;
        }
        self.send(SyntheticEvent::MouseButton { button, release }, "mouse button");
    }

    /// Injects a vertical wheel rotation.
    pub fn scroll(&self, distance: i32) {
        self.send(SyntheticEvent::Wheel { distance }, "mouse wheel");
    }

    /// Injects a keyboard key transition.
    ///
    /// The right-alt alias is collapsed to the left Windows key *before* the
    /// guard check so the state read and the injection agree on the key
    /// identity. The injection path (scan code vs virtual key) and the
    /// extended-key flag are decided from the normalized key.
    pub fn key(&self, vk: u16, release: bool) {
        let vk = keys::normalize(vk);

        if !self.guard.permits(vk, release) {
            return;
        }

        let event = SyntheticEvent::Key {
            vk,
            by_scan_code: !keys::needs_virtual_key_path(vk),
            extended: keys::is_extended(vk),
            release,
        };
        self.send(event, "keyboard");
    }

    fn send(&self, event: SyntheticEvent, what: &str) {
        let accepted = self.injector.inject(&event);
        if accepted != 1 {
            warn!(accepted, "couldn't inject {what} input");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::injection::mock::{MockInjector, MockKeyStates};
    use playlink_core::keys::{
        VK_DELETE, VK_DIVIDE, VK_DOWN, VK_END, VK_HOME, VK_INSERT, VK_LEFT, VK_LWIN, VK_NEXT,
        VK_PAUSE, VK_PRIOR, VK_RCONTROL, VK_RIGHT, VK_RWIN, VK_UP, VK_XBUTTON2,
    };

    fn translator_with(states: Arc<MockKeyStates>) -> (EventTranslator, Arc<MockInjector>) {
        let injector = Arc::new(MockInjector::new());
        let translator = EventTranslator::new(injector.clone(), states);
        (translator, injector)
    }

    #[test]
    fn test_mouse_move_translates_to_relative_motion() {
        let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

        translator.move_mouse(-7, 12);

        assert_eq!(
            injector.injected(),
            vec![SyntheticEvent::MouseMove { dx: -7, dy: 12 }]
        );
    }

    #[test]
    fn test_scroll_translates_to_wheel_distance() {
        let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

        translator.scroll(-120);

        assert_eq!(
            injector.injected(),
            vec![SyntheticEvent::Wheel { distance: -120 }]
        );
    }

    #[test]
    fn test_button_press_permitted_while_button_is_up() {
        let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

        translator.button_mouse(MouseButton::Left, false);

        assert_eq!(injector.injected().len(), 1);
    }

    #[test]
    fn test_button_press_rejected_while_button_is_already_down() {
        // A press of a button the OS already considers held is a duplicate.
        for index in 1..=5u8 {
            let states = Arc::new(MockKeyStates::new());
            let button = MouseButton::from_index(index);
            states.set_pressed(button.virtual_key(), true);
            let (translator, injector) = translator_with(states);

            translator.button_mouse(button, false);

            assert!(
                injector.injected().is_empty(),
                "duplicate press of button {index} must not be injected"
            );
        }
    }

    #[test]
    fn test_button_release_rejected_while_button_is_already_up() {
        for index in 1..=5u8 {
            let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

            translator.button_mouse(MouseButton::from_index(index), true);

            assert!(
                injector.injected().is_empty(),
                "no-op release of button {index} must not be injected"
            );
        }
    }

    #[test]
    fn test_button_release_permitted_while_button_is_down() {
        let states = Arc::new(MockKeyStates::new());
        states.set_pressed(VK_XBUTTON2, true);
        let (translator, injector) = translator_with(states);

        translator.button_mouse(MouseButton::Extra, true);

        assert_eq!(
            injector.injected(),
            vec![SyntheticEvent::MouseButton {
                button: MouseButton::Extra,
                release: true,
            }]
        );
    }

    #[test]
    fn test_right_alt_is_remapped_before_guard_and_injection() {
        use playlink_core::keys::VK_RMENU;

        // The guard must probe the *remapped* key: holding left-Win down
        // makes the press a duplicate even though right-alt itself is up.
        let states = Arc::new(MockKeyStates::new());
        states.set_pressed(VK_LWIN, true);
        let (translator, injector) = translator_with(states);
        translator.key(VK_RMENU, false);
        assert!(injector.injected().is_empty());

        // With left-Win up, the press goes through carrying VK_LWIN.
        let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));
        translator.key(VK_RMENU, false);
        match injector.injected()[..] {
            [SyntheticEvent::Key { vk, .. }] => assert_eq!(vk, VK_LWIN),
            ref other => panic!("expected one key event, got {other:?}"),
        }
    }

    #[test]
    fn test_extended_keys_carry_the_extended_flag() {
        let extended = [
            VK_INSERT, VK_DELETE, VK_HOME, VK_END, VK_PRIOR, VK_NEXT, VK_UP, VK_DOWN, VK_LEFT,
            VK_RIGHT, VK_DIVIDE, VK_RCONTROL,
        ];
        for vk in extended {
            let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

            translator.key(vk, false);

            match injector.injected()[..] {
                [SyntheticEvent::Key { extended, .. }] => {
                    assert!(extended, "vk {vk:#04x} must carry the extended flag")
                }
                ref other => panic!("expected one key event, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ordinary_keys_do_not_carry_the_extended_flag() {
        for vk in [0x41_u16, 0x0D, 0x20] {
            let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

            translator.key(vk, false);

            match injector.injected()[..] {
                [SyntheticEvent::Key { extended, .. }] => {
                    assert!(!extended, "vk {vk:#04x} must not carry the extended flag")
                }
                ref other => panic!("expected one key event, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_special_keys_use_the_virtual_key_path() {
        for vk in [VK_LWIN, VK_RWIN, VK_PAUSE] {
            let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

            translator.key(vk, false);

            match injector.injected()[..] {
                [SyntheticEvent::Key { by_scan_code, .. }] => {
                    assert!(!by_scan_code, "vk {vk:#04x} must go by virtual key")
                }
                ref other => panic!("expected one key event, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ordinary_keys_use_the_scan_code_path() {
        let (translator, injector) = translator_with(Arc::new(MockKeyStates::new()));

        translator.key(0x41, false); // 'A'

        match injector.injected()[..] {
            [SyntheticEvent::Key { by_scan_code, .. }] => assert!(by_scan_code),
            ref other => panic!("expected one key event, got {other:?}"),
        }
    }

    #[test]
    fn test_key_release_carries_the_release_flag() {
        let states = Arc::new(MockKeyStates::new());
        states.set_pressed(0x41, true);
        let (translator, injector) = translator_with(states);

        translator.key(0x41, true);

        match injector.injected()[..] {
            [SyntheticEvent::Key { release, .. }] => assert!(release),
            ref other => panic!("expected one key event, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_acceptance_is_tolerated() {
        // The OS refusing an event is logged and dropped; the translator
        // must keep accepting subsequent events.
        let injector = Arc::new(MockInjector::rejecting());
        let translator =
            EventTranslator::new(injector.clone(), Arc::new(MockKeyStates::new()));

        translator.move_mouse(1, 1);
        translator.scroll(120);

        assert_eq!(injector.injected().len(), 2);
    }
}
