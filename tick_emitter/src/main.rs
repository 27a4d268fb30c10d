//! Synthetic market-data tick emitter.
//!
//! Streams simulated `sequence,timestamp,price,size` ticks as UDP datagrams to
//! one destination at a target rate, as a load source for feed handlers.
//!
//! Usage example (CLI):
//! ```bash
//! tick_emitter 127.0.0.1 9000 2000 --seed 42 --pacing deadline
//! ```
//!
//! Building blocks:
//! - `TickGenerator` — random-walk price and uniform size, one tick per call.
//! - `TickEmitter` — owns the socket and the generator, runs the paced loop.
//! - `ShutdownSignal` — Ctrl+C handler observed once per iteration; the loop
//!   returns normally and the socket is dropped before the process exits 0.
//!
//! Delivery is fire-and-forget. A failed send is fatal and exits non-zero.
#![warn(missing_docs)]
mod args;
mod config;
mod emitter;
mod model;

use crate::args::Args;
use crate::config::EmitterConfig;
use crate::emitter::TickEmitter;
use clap::Parser;
use std::io;
use log::{error, info};
use tick_common::ShutdownSignal;
use tick_common::TickError;
use tick_common::Result;

fn main() -> Result<(), TickError> {
    init_logger();
    let args = Args::parse();
    let config = EmitterConfig::try_from(args).inspect_err(|e| error!("{}", e))?;

    let shutdown = ShutdownSignal::install_ctrlc()?;
    let mut emitter = TickEmitter::from_config(&config).inspect_err(|e| error!("{}", e))?;

    println!(
        "Sending ticks to {}:{} at {:?} hz (interval {:.6}s)",
        config.host,
        config.port,
        config.rate_hz,
        config.interval.as_secs_f64()
    );
    info!("Resolved destination: {}", emitter.destination());
    if let Some(seed) = config.seed {
        info!("Generator seed: {}", seed);
    }

    let summary = match emitter.run(&shutdown) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Emitter stopped: {}", e);
            return Err(e);
        }
    };
    drop(emitter);

    summary.write_shutdown_line(&mut io::stdout().lock(), shutdown.is_requested())?;
    let elapsed = summary.elapsed.as_secs_f64();
    info!(
        "{} ticks sent in {:.3}s ({:.1} hz effective)",
        summary.ticks_sent,
        elapsed,
        if elapsed > 0.0 { summary.ticks_sent as f64 / elapsed } else { 0.0 }
    );
    info!(
        "Last sequence {}, last price {:.6}",
        summary.next_sequence.saturating_sub(1),
        summary.last_price
    );
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
