//!
//! Common types and utilities shared by the tick emitter and the tick probe.
//!
//! This crate aggregates:
//! - `error` — unified error type `TickError` used across the workspace.
//! - `result` — handy `Result<T, TickError>` alias.
//! - `tick` — the `Tick` record and its CSV line codec (the wire format).
//! - `net` — networking defaults and address helpers.
//! - `shutdown` — cooperative Ctrl+C shutdown signal.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod result;
pub mod shutdown;
pub mod tick;

pub use error::TickError;
pub use result::Result;
pub use shutdown::{ShutdownHandle, ShutdownSignal};
pub use tick::Tick;
