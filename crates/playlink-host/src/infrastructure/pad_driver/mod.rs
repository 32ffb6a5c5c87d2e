//! Virtual controller bus adapters.
//!
//! `vigem` talks to the real ViGEmBus driver; `mock` records driver calls
//! for lifecycle tests and is always compiled.

pub mod mock;

#[cfg(target_os = "windows")]
pub mod vigem;

#[cfg(target_os = "windows")]
pub use vigem::VigemDriver;
