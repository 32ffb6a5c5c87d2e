//! playlink-host library entry point.
//!
//! Host-side input injection for the Playlink remote-play agent. The agent
//! streams a running game to a remote client; this crate is the return
//! path: it turns the client's keyboard, mouse, and gamepad events into
//! real input on the host.
//!
//! The surrounding agent:
//!
//! 1. Accepts a remote-control session and creates one
//!    [`application::session::InputSession`].
//! 2. Feeds every decoded input event into the session's five operations
//!    (`move_mouse`, `button_mouse`, `scroll`, `key`, `gamepad`) from its
//!    single event-processing task.
//! 3. On a fatal gamepad fault, flushes its diagnostics sink and terminates
//!    the process; a desynchronized virtual pad must not keep running.
//! 4. Drops the session at session end, which tears the virtual pad down
//!    (detach, then disconnect).
//!
//! Mouse and keyboard events go through `SendInput`; gamepad reports go to
//! a virtual Xbox 360 controller emulated by the ViGEmBus kernel driver.
//! When that driver is unavailable the session runs in a supported degraded
//! mode with gamepad events discarded.

pub mod application;
pub mod infrastructure;

pub use application::session::InputSession;
pub use application::virtual_pad::{GamepadFault, Severity};

/// Builds an [`InputSession`] wired to the native Windows adapters.
///
/// Gamepad passthrough is attempted only when the settings allow it; a
/// session always comes up, degraded if the bus driver is unavailable.
#[cfg(target_os = "windows")]
pub fn native_session(settings: &infrastructure::settings::InputSettings) -> InputSession {
    use std::sync::Arc;

    use application::inject_input::{InputInjector, KeyStateProbe};
    use application::virtual_pad::ControllerDriver;
    use infrastructure::injection::SendInputInjector;
    use infrastructure::pad_driver::VigemDriver;

    let os = Arc::new(SendInputInjector::new());
    let injector: Arc<dyn InputInjector> = os.clone();
    let key_states: Arc<dyn KeyStateProbe> = os;

    let driver = settings
        .gamepad
        .enabled
        .then(|| Box::new(VigemDriver::new()) as Box<dyn ControllerDriver>);

    InputSession::new(injector, key_states, driver)
}
