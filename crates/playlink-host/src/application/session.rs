//! The per-session entry point for all input injection.
//!
//! One [`InputSession`] is created when a remote-control session starts and
//! dropped when it ends. It owns the event translator and, when the virtual
//! controller bus is available, the virtual gamepad device. Gamepad absence
//! is a valid, *permanent* state for the session (there is no re-attach),
//! so every gamepad event in a degraded session is a silent no-op.

use std::sync::Arc;

use playlink_core::{GamepadReport, MouseButton};
use tracing::{info, warn};
use uuid::Uuid;

use super::inject_input::{EventTranslator, InputInjector, KeyStateProbe};
use super::virtual_pad::{ControllerDriver, GamepadFault, VirtualGamepadDevice};

/// Aggregate handle for one remote-control session's input stream.
pub struct InputSession {
    id: Uuid,
    translator: EventTranslator,
    gamepad: Option<VirtualGamepadDevice>,
}

impl InputSession {
    /// Builds a session from the OS ports and an optional pad driver.
    ///
    /// `pad_driver` is `None` when gamepad passthrough is disabled by
    /// configuration. When a driver is supplied but setup fails (bus not
    /// installed, attach rejected), the session still comes up without a
    /// virtual pad, because degraded mode is a supported configuration.
    /// The two absence causes are logged distinctly so an operator can tell
    /// "switched off" from "broken".
    pub fn new(
        injector: Arc<dyn InputInjector>,
        key_states: Arc<dyn KeyStateProbe>,
        pad_driver: Option<Box<dyn ControllerDriver>>,
    ) -> Self {
        let id = Uuid::new_v4();

        let gamepad = match pad_driver {
            None => {
                info!(session = %id, "gamepad passthrough disabled by configuration");
                None
            }
            Some(driver) => {
                // create() logs the driver's reason on failure.
                let device = VirtualGamepadDevice::create(driver);
                if device.is_none() {
                    warn!(session = %id, "session continues without gamepad passthrough");
                }
                device
            }
        };

        Self {
            id,
            translator: EventTranslator::new(injector, key_states),
            gamepad,
        }
    }

    /// The session identifier used for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether this session forwards gamepad reports to a virtual pad.
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.is_some()
    }

    /// Injects relative mouse motion.
    pub fn move_mouse(&self, dx: i32, dy: i32) {
        self.translator.move_mouse(dx, dy);
    }

    /// Injects a mouse button transition. `button_index` is the stream's
    /// numeric identity (1 = left … 5 = second X button).
    pub fn button_mouse(&self, button_index: u8, release: bool) {
        self.translator
            .button_mouse(MouseButton::from_index(button_index), release);
    }

    /// Injects a vertical wheel rotation.
    pub fn scroll(&self, distance: i32) {
        self.translator.scroll(distance);
    }

    /// Injects a keyboard key transition.
    pub fn key(&self, vk: u16, release: bool) {
        self.translator.key(vk, release);
    }

    /// Forwards one gamepad report to the virtual pad.
    ///
    /// A session without a virtual pad accepts and discards the report
    /// without touching any driver.
    ///
    /// # Errors
    ///
    /// Returns a [`GamepadFault`] (always fatal) when the driver rejects
    /// an update. The caller owns the process and must flush diagnostics
    /// and terminate; this layer only classifies.
    pub fn gamepad(&mut self, report: &GamepadReport) -> Result<(), GamepadFault> {
        match self.gamepad.as_mut() {
            None => Ok(()),
            Some(device) => device.update(report),
        }
    }
}
