//! OS synthetic-input adapters.
//!
//! The Windows implementation is selected at compile time; the mock is
//! always compiled so tests run on any platform without synthesizing real
//! input on the test machine.

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::SendInputInjector;
