//! Data model for the probe:
//! - `feed_stats` — sequence gap tracking and latency percentiles.
//! - `ofi` — order-flow imbalance between consecutive ticks.
//! - `predictor` — EWMA of the imbalance turned into BUY/SELL/HOLD.
pub mod feed_stats;
pub mod ofi;
pub mod predictor;
