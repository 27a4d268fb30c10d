//! Error types shared between the emitter and the probe.
//!
//! `TickError` separates startup problems (`Config`, `Io`) from the fatal
//! runtime failure of the emitter (`Transmission`). An operator interrupt is
//! not an error and has no variant here; see `shutdown`.
use std::io;

use thiserror::Error;

/// Unified error type shared by emitter and probe.
#[derive(Error, Debug)]
pub enum TickError {
    /// Invalid startup parameters (non-positive rate, unresolvable host, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sending a datagram failed. Not retried.
    #[error("Transmission error: {0}")]
    Transmission(#[source] io::Error),

    /// I/O error while setting up or reading from a socket.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A datagram did not contain a well-formed tick line.
    #[error("Malformed tick: {0}")]
    Parse(String),

    /// The Ctrl+C handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    /// Failure while encoding JSON via serde_json.
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
