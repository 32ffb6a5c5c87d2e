//! # playlink-core
//!
//! Shared library for the Playlink remote-play host containing the abstract
//! input-event model, Windows virtual-key classification tables, and the
//! gamepad report with its driver wire-format codec.
//!
//! This crate is used by the host agent and by tooling that replays captured
//! input streams. It has zero dependencies on OS APIs or network sockets.
//!
//! # Architecture overview
//!
//! Playlink streams a running game from a host PC to a remote client. The
//! client sends back the player's keyboard, mouse, and gamepad activity as
//! compact events; the host turns those events into real OS input so the
//! game reacts as if the player were sitting at the machine.
//!
//! This crate is the shared vocabulary for that return path:
//!
//! - **`events`** – Abstract identities for mouse buttons as they appear in
//!   the client event stream (numeric indices on the wire, typed enum here).
//!
//! - **`keys`** – Windows virtual-key constants plus the two classification
//!   sets (extended keys, virtual-key-only keys) and the right-alt alias
//!   normalization that event translation depends on.
//!
//! - **`report`** – The fixed-layout gamepad report and its byte-exact
//!   encoding into the virtual controller driver's wire format.

pub mod events;
pub mod keys;
pub mod report;

// Re-export the most-used types at the crate root so callers can write
// `playlink_core::GamepadReport` instead of the full module path.
pub use events::MouseButton;
pub use report::{GamepadReport, ReportError, REPORT_WIRE_LEN};
