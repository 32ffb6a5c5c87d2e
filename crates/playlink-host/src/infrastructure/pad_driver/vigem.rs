//! ViGEmBus adapter: the real [`ControllerDriver`] implementation.
//!
//! ViGEmBus is a kernel-mode bus driver that emulates Xbox 360 / DualShock 4
//! controllers; `vigem-client` is its user-mode client library. One driver
//! instance manages at most one bus connection and one wired Xbox 360
//! target, matching the one-pad-per-session model.
//!
//! Reference: <https://github.com/nefarius/ViGEmBus> and
//! <https://github.com/CasualX/vigem-client>.

#![cfg(target_os = "windows")]

use std::sync::Arc;

use vigem_client::{Client, TargetId, XButtons, XGamepad, Xbox360Wired};

use playlink_core::report::{GamepadReport, REPORT_WIRE_LEN};

use crate::application::virtual_pad::{ControllerDriver, DriverError};

// The driver consumes XGamepad by value, but the network side encodes and
// decodes reports through the explicit wire codec. If the driver-side
// structure ever grows past one wire report, the two formats have drifted.
const _: () = assert!(
    std::mem::size_of::<XGamepad>() == REPORT_WIRE_LEN,
    "XGamepad no longer matches the 12-byte XUSB report"
);

/// [`ControllerDriver`] backed by a live ViGEmBus connection.
pub struct VigemDriver {
    client: Option<Arc<Client>>,
    target: Option<Xbox360Wired<Arc<Client>>>,
}

impl VigemDriver {
    pub fn new() -> Self {
        Self {
            client: None,
            target: None,
        }
    }
}

impl Default for VigemDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerDriver for VigemDriver {
    fn connect(&mut self) -> Result<(), DriverError> {
        let client =
            Client::connect().map_err(|err| DriverError::BusUnavailable(err.to_string()))?;
        self.client = Some(Arc::new(client));
        Ok(())
    }

    fn attach_target(&mut self) -> Result<(), DriverError> {
        let client = self.client.as_ref().ok_or(DriverError::NotConnected)?;

        let mut target = Xbox360Wired::new(Arc::clone(client), TargetId::XBOX360_WIRED);
        target
            .plugin()
            .map_err(|err| DriverError::Attach(err.to_string()))?;
        // The bus raises the pad asynchronously; updates sent before it is
        // ready are silently discarded by the driver.
        target
            .wait_ready()
            .map_err(|err| DriverError::Attach(err.to_string()))?;

        self.target = Some(target);
        Ok(())
    }

    fn detach_target(&mut self) -> Result<(), DriverError> {
        let mut target = self.target.take().ok_or(DriverError::NotAttached)?;
        target
            .unplug()
            .map_err(|err| DriverError::Detach(err.to_string()))
    }

    fn target_attached(&self) -> bool {
        self.target
            .as_ref()
            .map(|target| target.is_attached())
            .unwrap_or(false)
    }

    fn update(&mut self, report: &GamepadReport) -> Result<(), DriverError> {
        let target = self.target.as_mut().ok_or(DriverError::NotAttached)?;
        target
            .update(&to_xusb(report))
            .map_err(|err| DriverError::Update(err.to_string()))
    }

    fn disconnect(&mut self) {
        // Targets borrow the client; drop order matters here.
        self.target = None;
        self.client = None;
    }
}

/// Explicit field-by-field mapping into the driver's report structure.
fn to_xusb(report: &GamepadReport) -> XGamepad {
    XGamepad {
        buttons: XButtons {
            raw: report.buttons,
        },
        left_trigger: report.left_trigger,
        right_trigger: report.right_trigger,
        thumb_lx: report.left_stick_x,
        thumb_ly: report.left_stick_y,
        thumb_rx: report.right_stick_x,
        thumb_ry: report.right_stick_y,
    }
}
