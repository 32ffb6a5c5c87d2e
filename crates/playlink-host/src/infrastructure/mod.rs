//! Infrastructure layer: OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `playlink_core`, but MUST NOT be imported by the application layer.
//!
//! # Sub-modules
//!
//! - **`injection`** – Implementations of the `InputInjector` and
//!   `KeyStateProbe` ports: `SendInput`/`GetAsyncKeyState` on Windows, plus
//!   always-compiled recording mocks.
//!
//! - **`pad_driver`** – Implementations of the `ControllerDriver` port:
//!   the ViGEmBus client on Windows, plus a scriptable mock.
//!
//! - **`net_info`** – Network-adapter enumeration and MAC resolution for
//!   Wake-on-LAN pairing metadata.
//!
//! - **`settings`** – TOML settings controlling whether gamepad passthrough
//!   is attempted at all.

pub mod injection;
pub mod net_info;
pub mod pad_driver;
pub mod settings;
