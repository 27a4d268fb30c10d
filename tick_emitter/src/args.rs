use clap::Parser;
use tick_common::net::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RATE_HZ};

use crate::config::PacingMode;

/// Synthetic market-data tick generator: streams CSV ticks over UDP.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Destination host
    #[arg(default_value = DEFAULT_HOST)]
    pub host: String,

    /// Destination UDP port
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Target emission rate in ticks per second
    #[arg(default_value_t = DEFAULT_RATE_HZ, allow_negative_numbers = true)]
    pub rate_hz: f64,

    /// Seed for a reproducible price/size stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// How the loop is paced between ticks
    #[arg(long, value_enum, default_value_t = PacingMode::FixedDelay)]
    pub pacing: PacingMode,

    /// Stop after this many ticks
    #[arg(long)]
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_defaults() {
        let args = Args::try_parse_from(["tick_emitter"]).unwrap();
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 9000);
        assert_eq!(args.rate_hz, 2000.0);
        assert_eq!(args.pacing, PacingMode::FixedDelay);
        assert!(args.seed.is_none());
        assert!(args.count.is_none());
    }

    #[test]
    fn positional_arguments_in_order() {
        let args = Args::try_parse_from(["tick_emitter", "10.0.0.5", "9100", "500"]).unwrap();
        assert_eq!(args.host, "10.0.0.5");
        assert_eq!(args.port, 9100);
        assert_eq!(args.rate_hz, 500.0);
    }

    #[test]
    fn non_numeric_port_or_rate_is_rejected() {
        assert!(Args::try_parse_from(["tick_emitter", "localhost", "nine"]).is_err());
        assert!(Args::try_parse_from(["tick_emitter", "localhost", "9000", "fast"]).is_err());
        assert!(Args::try_parse_from(["tick_emitter", "localhost", "70000"]).is_err());
    }

    #[test]
    fn negative_rate_reaches_validation() {
        let args = Args::try_parse_from(["tick_emitter", "localhost", "9000", "-5"]).unwrap();
        assert_eq!(args.rate_hz, -5.0);
    }

    #[test]
    fn parses_options() {
        let args = Args::try_parse_from([
            "tick_emitter",
            "--seed",
            "42",
            "--pacing",
            "deadline",
            "--count",
            "10",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.pacing, PacingMode::Deadline);
        assert_eq!(args.count, Some(10));
    }
}
