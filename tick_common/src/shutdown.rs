//! Cooperative shutdown signal.
//!
//! The Ctrl+C handler runs on its own thread and only sends a token on a
//! `crossbeam_channel`. The control loop owns the `ShutdownSignal` and polls it
//! at its checkpoints, so cancellation never interrupts a send half-way.
use std::cell::Cell;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};
use log::info;

use crate::error::TickError;

/// Sending half: requests shutdown.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

/// Receiving half, owned by the control loop.
pub struct ShutdownSignal {
    rx: Receiver<()>,
    triggered: Cell<bool>,
}

/// Create a connected handle/signal pair.
pub fn channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = bounded::<()>(1);
    (
        ShutdownHandle { tx },
        ShutdownSignal {
            rx,
            triggered: Cell::new(false),
        },
    )
}

impl ShutdownHandle {
    /// Ask the loop to stop. Repeated requests are no-ops.
    pub fn request(&self) {
        let _ = self.tx.try_send(());
    }
}

impl ShutdownSignal {
    /// Install a process-wide Ctrl+C handler wired to a new signal.
    pub fn install_ctrlc() -> Result<Self, TickError> {
        let (handle, signal) = channel();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down...");
            handle.request();
        })?;
        Ok(signal)
    }

    /// Non-blocking check. Once it has returned `true` it keeps returning `true`.
    pub fn is_requested(&self) -> bool {
        if self.triggered.get() {
            return true;
        }
        match self.rx.try_recv() {
            Ok(()) => {
                self.triggered.set(true);
                true
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Sleep for `timeout`, waking early on a shutdown request.
    ///
    /// Returns `true` if shutdown was requested.
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.triggered.get() {
            return true;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(()) => {
                self.triggered.set(true);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            // Nobody can request shutdown any more; still honour the delay.
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                false
            }
        }
    }
}
