//! UDP receive loop for the probe.
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tick_common::net::addr;
use tick_common::tick::now_secs;
use tick_common::{Result, ShutdownSignal, Tick};

use crate::model::feed_stats::{FeedStats, SequenceCheck};
use crate::model::ofi::OfiTracker;
use crate::model::predictor::{Decision, Predictor, Signal};

/// How often a blocked `recv` gives the loop a chance to notice shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(200);
/// Tick lines are far shorter; anything longer is reported as malformed.
const BUF_SIZE: usize = 2048;

/// Per-tick logging style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickLog {
    Line,
    Json,
    Off,
}

/// Bound UDP socket that turns datagrams into `FeedStats` updates.
pub struct TickReceiver {
    socket: UdpSocket,
}

impl TickReceiver {
    pub fn bind(ip: &str, port: u16) -> Result<Self> {
        let socket = UdpSocket::bind(addr(ip, port))?;
        socket.set_read_timeout(Some(POLL_INTERVAL))?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive until shutdown is requested. Malformed datagrams are counted,
    /// not fatal; a socket error other than a poll timeout ends the loop.
    ///
    /// Every tick is run through OFI and `predictor`; BUY and SELL decisions
    /// are printed as they happen.
    pub fn receive_loop(
        &self,
        shutdown: &ShutdownSignal,
        stats: &mut FeedStats,
        predictor: &mut Predictor,
        tick_log: TickLog,
    ) -> Result<()> {
        info!("Tick receiver running on: {}", self.local_addr()?);
        let mut buf = [0u8; BUF_SIZE];
        let mut ofi_tracker = OfiTracker::new();

        while !shutdown.is_requested() {
            let size = match self.socket.recv(&mut buf) {
                Ok(size) => size,
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::ConnectionReset
                    ) =>
                {
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let received_at = Instant::now();
            let recv_ts = now_secs();

            let tick = match Tick::from_bytes(&buf[..size]) {
                Ok(tick) => tick,
                Err(e) => {
                    stats.record_malformed();
                    debug!("{} ({:?})", e, String::from_utf8_lossy(&buf[..size]));
                    continue;
                }
            };

            if let SequenceCheck::Gap(skipped) = stats.record(&tick, recv_ts) {
                warn!("Gap: {} ticks missing before #{}", skipped, tick.sequence);
            }

            let ofi = ofi_tracker.update(&tick);
            let signal = predictor.process_sample(ofi);
            let decision = Decision {
                sequence: tick.sequence,
                signal,
                ewma: predictor.ewma(),
                ofi,
                recv_to_decision_us: received_at.elapsed().as_secs_f64() * 1e6,
                src_to_recv_us: (recv_ts - tick.timestamp) * 1e6,
            };
            stats.record_decision(&decision);
            match tick_log {
                TickLog::Line => info!("TICK {}", tick),
                TickLog::Json => info!("{}", serde_json::to_string(&tick)?),
                TickLog::Off => {}
            }
            if signal != Signal::Hold {
                println!("{}", decision);
            }
        }
        info!("Receiver loop stopping...");
        Ok(())
    }
}
