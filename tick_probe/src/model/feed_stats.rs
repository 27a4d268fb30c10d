//! Stream health bookkeeping for received ticks.
//!
//! `FeedStats` keeps the next expected sequence number and one latency sample
//! per tick (receive time minus the emitter's timestamp, in microseconds).
//! The first tick seen sets the baseline, so attaching to a running stream
//! does not count the ticks sent before the probe started.
//!
//! A tick carrying `u64::MAX` leaves nothing to expect after it, so the next
//! tick becomes a fresh baseline, as if the emitter had restarted.
//!
//! Percentiles use the nearest-rank-below rule: index `floor(q * (n - 1))`
//! into the sorted samples.
use serde::Serialize;
use tick_common::Tick;

use crate::model::predictor::{Decision, Signal};

/// How a tick relates to the ticks seen before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceCheck {
    /// Exactly the expected sequence number.
    InOrder,
    /// This many sequence numbers were skipped.
    Gap(u64),
    /// Older than expected: reordered or duplicated.
    OutOfOrder,
}

/// Latency distribution in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencySummary {
    pub count: usize,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub mean: f64,
}

/// Totals reported at shutdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSummary {
    pub received: u64,
    pub malformed: u64,
    pub missing: u64,
    pub out_of_order: u64,
    pub buys: u64,
    pub sells: u64,
    pub src_to_recv_us: Option<LatencySummary>,
    pub recv_to_decision_us: Option<LatencySummary>,
}

#[derive(Debug, Default)]
pub struct FeedStats {
    expected_next: Option<u64>,
    received: u64,
    malformed: u64,
    missing: u64,
    out_of_order: u64,
    buys: u64,
    sells: u64,
    latencies_us: Vec<f64>,
    decision_latencies_us: Vec<f64>,
}

impl FeedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for `tick`, received at `recv_ts` seconds since the epoch.
    pub fn record(&mut self, tick: &Tick, recv_ts: f64) -> SequenceCheck {
        self.received += 1;
        self.latencies_us.push((recv_ts - tick.timestamp) * 1e6);

        let check = match self.expected_next {
            None => SequenceCheck::InOrder,
            Some(expected) if tick.sequence == expected => SequenceCheck::InOrder,
            Some(expected) if tick.sequence > expected => SequenceCheck::Gap(tick.sequence - expected),
            Some(_) => SequenceCheck::OutOfOrder,
        };

        match check {
            SequenceCheck::Gap(skipped) => self.missing += skipped,
            SequenceCheck::OutOfOrder => self.out_of_order += 1,
            SequenceCheck::InOrder => {}
        }
        if check != SequenceCheck::OutOfOrder {
            self.expected_next = tick.sequence.checked_add(1);
        }
        check
    }

    /// Account for the predictor's verdict on a tick.
    pub fn record_decision(&mut self, decision: &Decision) {
        self.decision_latencies_us.push(decision.recv_to_decision_us);
        match decision.signal {
            Signal::Buy => self.buys += 1,
            Signal::Sell => self.sells += 1,
            Signal::Hold => {}
        }
    }

    /// Count a datagram that did not parse as a tick.
    pub fn record_malformed(&mut self) {
        self.malformed += 1;
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn summary(&self) -> FeedSummary {
        FeedSummary {
            received: self.received,
            malformed: self.malformed,
            missing: self.missing,
            out_of_order: self.out_of_order,
            buys: self.buys,
            sells: self.sells,
            src_to_recv_us: latency_summary(&self.latencies_us),
            recv_to_decision_us: latency_summary(&self.decision_latencies_us),
        }
    }
}

fn latency_summary(samples: &[f64]) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let percentile = |q: f64| sorted[(q * (sorted.len() - 1) as f64) as usize];

    Some(LatencySummary {
        count: sorted.len(),
        p50: percentile(0.5),
        p90: percentile(0.9),
        p99: percentile(0.99),
        mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
    })
}
