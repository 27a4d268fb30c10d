//! Validated emitter configuration.
//!
//! `Args` is whatever the user typed; `EmitterConfig` is what the loop runs
//! with. The conversion rejects rates that would divide by zero or produce an
//! unrepresentable interval, so nothing fails after the first tick is sent.
use std::time::Duration;

use clap::ValueEnum;
use strum_macros::{Display, EnumString};
use tick_common::TickError;

use crate::args::Args;

/// Pacing strategy between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PacingMode {
    /// Sleep a constant interval after every send; processing time is not
    /// compensated, so the real rate is slightly below the target.
    FixedDelay,
    /// Sleep until the next deadline on a fixed schedule.
    Deadline,
}

/// Runtime configuration of the emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub host: String,
    pub port: u16,
    pub rate_hz: f64,
    pub interval: Duration,
    pub pacing: PacingMode,
    pub seed: Option<u64>,
    pub count: Option<u64>,
}

impl TryFrom<Args> for EmitterConfig {
    type Error = TickError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if !args.rate_hz.is_finite() || args.rate_hz <= 0.0 {
            return Err(TickError::Config(format!(
                "rate_hz must be a positive number, got {}",
                args.rate_hz
            )));
        }
        let interval = Duration::try_from_secs_f64(1.0 / args.rate_hz).map_err(|e| {
            TickError::Config(format!("rate_hz {} gives no usable interval: {}", args.rate_hz, e))
        })?;

        Ok(Self {
            host: args.host.trim().to_string(),
            port: args.port,
            rate_hz: args.rate_hz,
            interval,
            pacing: args.pacing,
            seed: args.seed,
            count: args.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(argv: &[&str]) -> Result<EmitterConfig, TickError> {
        let mut full = vec!["tick_emitter"];
        full.extend_from_slice(argv);
        EmitterConfig::try_from(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn default_interval_is_half_a_millisecond() {
        let config = config(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.rate_hz, 2000.0);
        assert_eq!(config.interval, Duration::from_micros(500));
        assert_eq!(config.pacing, PacingMode::FixedDelay);
    }

    #[test]
    fn zero_rate_is_a_config_error() {
        let err = config(&["127.0.0.1", "9000", "0"]).unwrap_err();
        assert!(matches!(err, TickError::Config(_)));
    }

    #[test]
    fn negative_and_non_finite_rates_are_config_errors() {
        assert!(matches!(
            config(&["127.0.0.1", "9000", "-10"]),
            Err(TickError::Config(_))
        ));
        assert!(matches!(
            config(&["127.0.0.1", "9000", "inf"]),
            Err(TickError::Config(_))
        ));
        assert!(matches!(
            config(&["127.0.0.1", "9000", "NaN"]),
            Err(TickError::Config(_))
        ));
    }

    #[test]
    fn tiny_rate_without_representable_interval_is_rejected() {
        assert!(matches!(
            config(&["127.0.0.1", "9000", "1e-300"]),
            Err(TickError::Config(_))
        ));
    }

    #[test]
    fn pacing_mode_round_trips_through_strum() {
        assert_eq!(PacingMode::FixedDelay.to_string(), "fixed-delay");
        assert_eq!("Deadline".parse::<PacingMode>().unwrap(), PacingMode::Deadline);
    }
}
