//! Tick probe — the consuming side of the tick feed.
//!
//! Binds a UDP port and decodes every datagram as a `Tick`. Each tick feeds an
//! order-flow imbalance (OFI) estimate and an EWMA predictor; BUY and SELL
//! signals are printed as `[seq] BUY ewma=.. ofi=..` lines. On Ctrl+C it
//! prints how many ticks arrived, how many sequence numbers were never seen,
//! and the `recv->decision` and emitter-to-probe latency distributions.
//!
//! Usage example (CLI):
//! ```bash
//! tick_probe 9000 --quiet
//! ```
//!
//! Latency compares two wall clocks, so it is only meaningful when emitter and
//! probe run on the same host or on hosts with synchronised clocks.
#![warn(missing_docs)]
mod args;
mod model;
mod receiver;

use crate::args::Args;
use crate::model::feed_stats::{FeedStats, FeedSummary};
use crate::model::predictor::Predictor;
use crate::receiver::{TickLog, TickReceiver};
use clap::Parser;
use log::{error, info};
use std::io::{self, Write};
use tick_common::Result;
use tick_common::ShutdownSignal;
use tick_common::TickError;

fn main() -> Result<(), TickError> {
    init_logger();
    let args = Args::parse();
    let tick_log = match (args.quiet, args.json) {
        (true, _) => TickLog::Off,
        (false, true) => TickLog::Json,
        (false, false) => TickLog::Line,
    };

    let mut predictor = Predictor::new(args.alpha, args.threshold).inspect_err(|e| error!("{}", e))?;

    let shutdown = ShutdownSignal::install_ctrlc()?;
    let receiver = TickReceiver::bind(args.bind.trim(), args.port).inspect_err(|e| error!("{}", e))?;
    println!("Listening UDP on {}", receiver.local_addr()?);

    let mut stats = FeedStats::new();
    if let Err(e) = receiver.receive_loop(&shutdown, &mut stats, &mut predictor, tick_log) {
        error!("Receive data error: {}", e);
        write_summary(&mut io::stdout().lock(), &stats.summary(), args.json)?;
        return Err(e);
    }
    drop(receiver);

    info!(
        "Probe stopped after {} ticks, final ewma {:.2}",
        stats.received(),
        predictor.ewma()
    );
    write_summary(&mut io::stdout().lock(), &stats.summary(), args.json)
}

fn write_summary<W: Write>(out: &mut W, summary: &FeedSummary, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(summary)?)?;
        return Ok(());
    }
    writeln!(
        out,
        "TICKS received={} missing={} out_of_order={} malformed={} buys={} sells={}",
        summary.received,
        summary.missing,
        summary.out_of_order,
        summary.malformed,
        summary.buys,
        summary.sells
    )?;
    let stats = [
        ("recv->decision_us", &summary.recv_to_decision_us),
        ("src->recv_us", &summary.src_to_recv_us),
    ];
    for (name, latency) in stats {
        if let Some(latency) = latency {
            writeln!(
                out,
                "STAT {} count={} p50={:.1} p90={:.1} p99={:.1} mean={:.1}",
                name, latency.count, latency.p50, latency.p90, latency.p99, latency.mean
            )?;
        }
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
