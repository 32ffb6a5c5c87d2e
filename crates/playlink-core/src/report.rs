//! The gamepad report and its driver wire-format codec.
//!
//! The virtual controller bus driver (ViGEmBus) accepts Xbox 360 state
//! updates as an `XUSB_REPORT`: a packed 12-byte little-endian structure.
//! The client streams the same fields over the network, and the host must
//! hand them to the driver *byte-for-byte*: a silently shifted field would
//! steer the virtual pad with the wrong axis, which the player experiences
//! as uncontrollable input.
//!
//! Instead of reinterpreting a struct in place, the report is encoded field
//! by field at documented offsets, and the layout is pinned by compile-time
//! assertions. The decode direction exists for the network receive path.
//!
//! # Wire layout (`XUSB_REPORT`)
//!
//! | Offset | Size | Field          |
//! |--------|------|----------------|
//! | 0      | 2    | buttons (LE)   |
//! | 2      | 1    | left trigger   |
//! | 3      | 1    | right trigger  |
//! | 4      | 2    | left stick X   |
//! | 6      | 2    | left stick Y   |
//! | 8      | 2    | right stick X  |
//! | 10     | 2    | right stick Y  |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of the driver wire report in bytes.
pub const REPORT_WIRE_LEN: usize = 12;

/// Button bit assignments in [`GamepadReport::buttons`].
///
/// These are the `XUSB_GAMEPAD_*` bits of the Xbox 360 wired report.
/// Bits 0x0800 and the two unused low bits are reserved by the protocol.
pub mod buttons {
    pub const DPAD_UP: u16 = 0x0001;
    pub const DPAD_DOWN: u16 = 0x0002;
    pub const DPAD_LEFT: u16 = 0x0004;
    pub const DPAD_RIGHT: u16 = 0x0008;
    pub const START: u16 = 0x0010;
    pub const BACK: u16 = 0x0020;
    pub const LEFT_THUMB: u16 = 0x0040;
    pub const RIGHT_THUMB: u16 = 0x0080;
    pub const LEFT_SHOULDER: u16 = 0x0100;
    pub const RIGHT_SHOULDER: u16 = 0x0200;
    pub const GUIDE: u16 = 0x0400;
    pub const A: u16 = 0x1000;
    pub const B: u16 = 0x2000;
    pub const X: u16 = 0x4000;
    pub const Y: u16 = 0x8000;
}

/// Error type for report decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The byte slice is shorter than a full wire report.
    #[error("insufficient data: need {REPORT_WIRE_LEN} bytes, got {available}")]
    InsufficientData { available: usize },
}

/// One full gamepad state snapshot.
///
/// Field order mirrors the wire layout, but the layout contract is enforced
/// by [`GamepadReport::to_wire`], never by in-place reinterpretation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadReport {
    /// Bitmask of pressed buttons; see the [`buttons`] constants.
    pub buttons: u16,
    /// Left trigger pull, 0 (released) to 255 (fully pressed).
    pub left_trigger: u8,
    /// Right trigger pull, 0 to 255.
    pub right_trigger: u8,
    /// Left stick X, full signed range; 0 is centered.
    pub left_stick_x: i16,
    /// Left stick Y.
    pub left_stick_y: i16,
    /// Right stick X.
    pub right_stick_x: i16,
    /// Right stick Y.
    pub right_stick_y: i16,
}

// The in-memory struct must never be assumed to match the wire image, but
// its *fields* must add up to exactly one wire report. If a field is added
// or resized this trips at compile time and forces the codec to be revisited.
const _: () = assert!(
    2 + 1 + 1 + 2 + 2 + 2 + 2 == REPORT_WIRE_LEN,
    "GamepadReport fields no longer add up to one XUSB_REPORT"
);

impl GamepadReport {
    /// Encodes the report into the driver's `XUSB_REPORT` wire image.
    pub fn to_wire(&self) -> [u8; REPORT_WIRE_LEN] {
        let mut buf = [0u8; REPORT_WIRE_LEN];
        buf[0..2].copy_from_slice(&self.buttons.to_le_bytes());
        buf[2] = self.left_trigger;
        buf[3] = self.right_trigger;
        buf[4..6].copy_from_slice(&self.left_stick_x.to_le_bytes());
        buf[6..8].copy_from_slice(&self.left_stick_y.to_le_bytes());
        buf[8..10].copy_from_slice(&self.right_stick_x.to_le_bytes());
        buf[10..12].copy_from_slice(&self.right_stick_y.to_le_bytes());
        buf
    }

    /// Decodes a wire image back into a report.
    ///
    /// Extra trailing bytes are ignored so a report can be read out of a
    /// larger receive buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InsufficientData`] if `bytes` is shorter than
    /// [`REPORT_WIRE_LEN`].
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ReportError> {
        if bytes.len() < REPORT_WIRE_LEN {
            return Err(ReportError::InsufficientData {
                available: bytes.len(),
            });
        }
        Ok(Self {
            buttons: u16::from_le_bytes([bytes[0], bytes[1]]),
            left_trigger: bytes[2],
            right_trigger: bytes[3],
            left_stick_x: i16::from_le_bytes([bytes[4], bytes[5]]),
            left_stick_y: i16::from_le_bytes([bytes[6], bytes[7]]),
            right_stick_x: i16::from_le_bytes([bytes[8], bytes[9]]),
            right_stick_y: i16::from_le_bytes([bytes[10], bytes[11]]),
        })
    }
}
