//! Mock virtual controller driver for unit testing.
//!
//! Records every driver-boundary call in a shared log so tests can assert
//! lifecycle *ordering* (connect before attach, detach before disconnect)
//! after the driver has been boxed and moved into the device under test.
//! Failure toggles simulate the bus rejecting individual operations.

use std::sync::{Arc, Mutex};

use playlink_core::GamepadReport;

use crate::application::virtual_pad::{ControllerDriver, DriverError};

/// One recorded driver-boundary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Connect,
    AttachTarget,
    DetachTarget,
    Update(GamepadReport),
    Disconnect,
}

/// A scriptable in-memory [`ControllerDriver`].
#[derive(Default)]
pub struct MockPadDriver {
    calls: Arc<Mutex<Vec<DriverCall>>>,
    connected: bool,
    attached: bool,
    fail_connect: bool,
    fail_attach: bool,
    fail_detach: bool,
    fail_update: bool,
}

impl MockPadDriver {
    /// A driver where every operation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver whose `connect` is rejected (bus not installed).
    pub fn failing_connect() -> Self {
        Self {
            fail_connect: true,
            ..Self::default()
        }
    }

    /// A driver whose `attach_target` is rejected.
    pub fn failing_attach() -> Self {
        Self {
            fail_attach: true,
            ..Self::default()
        }
    }

    /// A driver whose `detach_target` is rejected.
    pub fn failing_detach() -> Self {
        Self {
            fail_detach: true,
            ..Self::default()
        }
    }

    /// A driver whose `update` is rejected (simulated bus fault).
    pub fn failing_update() -> Self {
        Self {
            fail_update: true,
            ..Self::default()
        }
    }

    /// A handle onto the call log that stays valid after the driver is
    /// boxed and moved into a device.
    pub fn call_log(&self) -> Arc<Mutex<Vec<DriverCall>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: DriverCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ControllerDriver for MockPadDriver {
    fn connect(&mut self) -> Result<(), DriverError> {
        self.record(DriverCall::Connect);
        if self.fail_connect {
            return Err(DriverError::BusUnavailable("mock bus not installed".into()));
        }
        self.connected = true;
        Ok(())
    }

    fn attach_target(&mut self) -> Result<(), DriverError> {
        self.record(DriverCall::AttachTarget);
        if !self.connected {
            return Err(DriverError::NotConnected);
        }
        if self.fail_attach {
            return Err(DriverError::Attach("mock attach rejected".into()));
        }
        self.attached = true;
        Ok(())
    }

    fn detach_target(&mut self) -> Result<(), DriverError> {
        self.record(DriverCall::DetachTarget);
        if !self.attached {
            return Err(DriverError::NotAttached);
        }
        self.attached = false;
        if self.fail_detach {
            return Err(DriverError::Detach("mock detach rejected".into()));
        }
        Ok(())
    }

    fn target_attached(&self) -> bool {
        self.attached
    }

    fn update(&mut self, report: &GamepadReport) -> Result<(), DriverError> {
        self.record(DriverCall::Update(*report));
        if !self.attached {
            return Err(DriverError::NotAttached);
        }
        if self.fail_update {
            return Err(DriverError::Update("mock bus fault".into()));
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        self.record(DriverCall::Disconnect);
        self.attached = false;
        self.connected = false;
    }
}
