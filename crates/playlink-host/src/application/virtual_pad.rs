//! Lifecycle of the virtual game controller backed by the ViGEmBus driver.
//!
//! The driver hands out two resources with a strict dependency order: a
//! *client connection* to the bus, and a *target* (the emulated pad)
//! registered against that connection. A target can only exist under a live
//! connection, so teardown is always detach-then-disconnect.
//!
//! # Failure tiers
//!
//! Setup failures are normal: the driver may simply not be installed on the
//! host. [`VirtualGamepadDevice::create`] logs and returns `None`, and the
//! session runs without gamepad passthrough.
//!
//! Update failures after a successful attach are a different animal. The
//! driver's contract is that updates to an attached target always succeed,
//! so a failure means the bus connection is in an unknown state, and a
//! half-synchronized virtual pad keeps feeding the game stale input the
//! remote player cannot correct. The device therefore classifies the fault
//! as [`Severity::Fatal`], refuses to touch the driver again, and leaves the
//! decision to terminate to the process owner. No retry is attempted at
//! either tier.

use playlink_core::GamepadReport;
use thiserror::Error;
use tracing::{error, warn};

/// Error type for the virtual controller driver boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The bus service could not be reached (driver missing or stopped).
    #[error("virtual controller bus unavailable: {0}")]
    BusUnavailable(String),

    /// The bus refused to register the pad target.
    #[error("target attach rejected: {0}")]
    Attach(String),

    /// The bus refused to remove the pad target.
    #[error("target detach rejected: {0}")]
    Detach(String),

    /// A state update for an attached target was rejected.
    #[error("target update rejected: {0}")]
    Update(String),

    /// An operation required a connection that was never opened.
    #[error("not connected to the virtual controller bus")]
    NotConnected,

    /// An operation required a target that is not attached.
    #[error("no virtual pad target attached")]
    NotAttached,

    /// The device faulted earlier and refuses further driver calls.
    #[error("virtual controller previously faulted")]
    Faulted,
}

/// Driver boundary for the virtual controller bus.
///
/// Implementations own the raw bus handles; the device built on top owns
/// the lifecycle ordering. At most one connection and one target exist per
/// driver instance. `disconnect` must be safe to call in any state,
/// including before `connect` ever succeeded.
pub trait ControllerDriver: Send {
    /// Opens the client connection to the bus service.
    fn connect(&mut self) -> Result<(), DriverError>;

    /// Allocates one virtual pad target and registers it on the connection.
    fn attach_target(&mut self) -> Result<(), DriverError>;

    /// Removes the pad target from the connection.
    fn detach_target(&mut self) -> Result<(), DriverError>;

    /// Whether the driver currently reports the target as attached.
    fn target_attached(&self) -> bool;

    /// Forwards one state report to the attached target.
    fn update(&mut self, report: &GamepadReport) -> Result<(), DriverError>;

    /// Releases the client connection. Idempotent.
    fn disconnect(&mut self);
}

/// How the session owner must react to a gamepad fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Log and carry on; the event stream continues.
    Recoverable,
    /// The virtual pad state can no longer be trusted. The owner must flush
    /// diagnostics and terminate the process; continuing would leave a
    /// desynchronized controller feeding the game.
    Fatal,
}

/// A fault raised by the virtual gamepad after successful attachment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("virtual gamepad fault: {source}")]
pub struct GamepadFault {
    #[source]
    pub source: DriverError,
}

impl GamepadFault {
    /// Every post-attach fault is fatal; see the module docs.
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

/// Internal device state. `Attached` is the only state in which driver
/// updates are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PadState {
    Attached,
    Faulted,
}

/// One virtual pad target attached to one bus connection.
///
/// Existence of a value implies the connect and attach steps both
/// succeeded; every failure path inside [`create`](Self::create) releases
/// whatever was acquired before returning `None`. Dropping the device runs
/// the fixed teardown sequence exactly once.
pub struct VirtualGamepadDevice {
    driver: Box<dyn ControllerDriver>,
    state: PadState,
}

impl VirtualGamepadDevice {
    /// Connects to the bus and attaches one pad target.
    ///
    /// Returns `None` when either step fails. That is a supported degraded
    /// configuration (the session simply has no gamepad passthrough), so
    /// the failure is logged with the driver's reason and never propagated.
    pub fn create(mut driver: Box<dyn ControllerDriver>) -> Option<Self> {
        if let Err(err) = driver.connect() {
            warn!("couldn't set up gamepad support: {err}");
            return None;
        }

        if let Err(err) = driver.attach_target() {
            error!("couldn't add a virtual pad to the bus connection: {err}");
            driver.disconnect();
            return None;
        }

        Some(Self {
            driver,
            state: PadState::Attached,
        })
    }

    /// Forwards one report to the attached target.
    ///
    /// # Errors
    ///
    /// Returns a [`GamepadFault`] (always [`Severity::Fatal`]) if the driver
    /// rejects the update or the device faulted earlier. After the first
    /// fault no further driver calls are issued.
    pub fn update(&mut self, report: &GamepadReport) -> Result<(), GamepadFault> {
        if self.state == PadState::Faulted {
            return Err(GamepadFault {
                source: DriverError::Faulted,
            });
        }

        match self.driver.update(report) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.state = PadState::Faulted;
                error!("couldn't send gamepad input to the virtual controller bus: {err}");
                Err(GamepadFault { source: err })
            }
        }
    }
}

impl Drop for VirtualGamepadDevice {
    fn drop(&mut self) {
        // Detach must precede disconnect: removal goes through the live
        // connection. A detach failure is logged and the disconnect still
        // runs unconditionally.
        if self.driver.target_attached() {
            if let Err(err) = self.driver.detach_target() {
                warn!("couldn't detach the virtual pad from the bus: {err}");
            }
        }
        self.driver.disconnect();
    }
}
