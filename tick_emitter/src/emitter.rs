//! The emit loop: generate, encode, send, pace.
//!
//! `TickEmitter` owns the UDP socket and the `TickGenerator`. The socket lives
//! exactly as long as the emitter, so every exit path out of `run` (shutdown,
//! `--count` reached, transmission error) releases it when the emitter is
//! dropped.
//!
//! Cancellation is checked before each iteration and during the pacing wait,
//! never between generating a tick and sending it.
use std::io::{self, Write};
use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;
use tick_common::net::{ANY_ADDR, addr, resolve_ipv4};
use tick_common::tick::now_secs;
use tick_common::{Result, ShutdownSignal, Tick, TickError};

use crate::config::{EmitterConfig, PacingMode};
use crate::model::generator::TickGenerator;

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitSummary {
    pub ticks_sent: u64,
    pub elapsed: Duration,
    /// Sequence number the next tick would have carried.
    pub next_sequence: u64,
    pub last_price: f64,
}

/// Paced UDP tick sender.
pub struct TickEmitter<R: Rng = StdRng> {
    socket: UdpSocket,
    destination: SocketAddr,
    generator: TickGenerator<R>,
    interval: Duration,
    pacing: PacingMode,
    limit: Option<u64>,
}

impl TickEmitter<StdRng> {
    /// Resolve the destination, bind a local socket and seed the generator.
    pub fn from_config(config: &EmitterConfig) -> Result<Self> {
        let destination = resolve_ipv4(&config.host, config.port)?;
        let generator = match config.seed {
            Some(seed) => TickGenerator::seeded(seed),
            None => TickGenerator::from_entropy(),
        };
        Ok(Self::new(destination, generator, config.interval, config.pacing)?.with_limit(config.count))
    }
}

impl<R: Rng> TickEmitter<R> {
    /// Bind an ephemeral IPv4 socket for sending to `destination`.
    pub fn new(
        destination: SocketAddr,
        generator: TickGenerator<R>,
        interval: Duration,
        pacing: PacingMode,
    ) -> Result<Self> {
        if !destination.is_ipv4() {
            return Err(TickError::Config(format!("destination {} is not IPv4", destination)));
        }
        let socket = UdpSocket::bind(addr(ANY_ADDR, 0))?;
        Ok(Self {
            socket,
            destination,
            generator,
            interval,
            pacing,
            limit: None,
        })
    }

    /// Stop on its own after `limit` ticks.
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Generate one tick and send it as a single datagram.
    pub fn emit_one(&mut self) -> Result<Tick> {
        let tick = self.generator.next_tick(now_secs());
        self.socket
            .send_to(&tick.to_bytes(), self.destination)
            .map_err(TickError::Transmission)?;
        debug!("Sent {} to {}", tick, self.destination);
        Ok(tick)
    }

    /// Emit until shutdown is requested or the limit is reached.
    ///
    /// A send failure ends the run with `TickError::Transmission`.
    pub fn run(&mut self, shutdown: &ShutdownSignal) -> Result<EmitSummary> {
        let started = Instant::now();
        let mut deadline = started;
        let mut ticks_sent = 0u64;

        info!(
            "Emitter running: {} -> {}, {} pacing every {:?}",
            self.local_addr()?,
            self.destination,
            self.pacing,
            self.interval
        );

        loop {
            if shutdown.is_requested() {
                break;
            }
            if self.limit.is_some_and(|limit| ticks_sent >= limit) {
                break;
            }

            self.emit_one()?;
            ticks_sent += 1;

            if self.limit.is_some_and(|limit| ticks_sent >= limit) {
                break;
            }
            if self.pace(shutdown, &mut deadline) {
                break;
            }
        }

        Ok(EmitSummary {
            ticks_sent,
            elapsed: started.elapsed(),
            next_sequence: self.generator.sequence(),
            last_price: self.generator.price(),
        })
    }

    /// Wait before the next tick. Returns `true` if shutdown was requested.
    fn pace(&self, shutdown: &ShutdownSignal, deadline: &mut Instant) -> bool {
        match self.pacing {
            PacingMode::FixedDelay => shutdown.wait(self.interval),
            PacingMode::Deadline => {
                *deadline += self.interval;
                let now = Instant::now();
                if *deadline <= now {
                    // Behind schedule: restart the schedule instead of bursting.
                    *deadline = now;
                    shutdown.is_requested()
                } else {
                    shutdown.wait(*deadline - now)
                }
            }
        }
    }
}

impl EmitSummary {
    /// Print the single line shown when the emitter stops cleanly.
    pub fn write_shutdown_line<W: Write>(&self, out: &mut W, interrupted: bool) -> io::Result<()> {
        if interrupted {
            writeln!(out, "\nTerminated by user.")
        } else {
            writeln!(out, "Sent {} ticks.", self.ticks_sent)
        }
    }
}
