//! Application layer: the input-injection use cases.
//!
//! - **`inject_input`** – Translates abstract mouse/keyboard events into OS
//!   injection descriptors, with the key-state guard that drops transitions
//!   contradicting the live OS key state. The OS boundary is reached only
//!   through the [`inject_input::InputInjector`] and
//!   [`inject_input::KeyStateProbe`] ports.
//!
//! - **`virtual_pad`** – Owns the virtual game controller lifecycle against
//!   the [`virtual_pad::ControllerDriver`] port: connect, attach one target,
//!   forward reports, and the fixed detach-then-disconnect teardown.
//!
//! - **`session`** – The aggregate handle callers hold: one
//!   [`session::InputSession`] per remote-control session, exposing the five
//!   event operations.
//!
//! **Dependency rule**: this layer depends on `playlink_core` only; the OS
//! adapters in `infrastructure` implement the ports defined here.

pub mod inject_input;
pub mod session;
pub mod virtual_pad;
