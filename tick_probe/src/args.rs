use clap::Parser;
use tick_common::net::{ANY_ADDR, DEFAULT_PORT};

use crate::model::predictor::{DEFAULT_ALPHA, DEFAULT_THRESHOLD};

/// Receives a tick stream over UDP and reports gaps and latency.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// UDP port to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Local address to bind
    #[arg(long, default_value = ANY_ADDR)]
    pub bind: String,

    /// Log ticks and the final summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not log individual ticks
    #[arg(long, short)]
    pub quiet: bool,

    /// EWMA smoothing factor for the order-flow imbalance, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// |EWMA| above which a BUY or SELL signal is printed
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,
}
