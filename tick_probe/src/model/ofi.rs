//! Order-flow imbalance between consecutive ticks.
//!
//! With only last price and size on the wire, the imbalance is approximated as
//! `sign(price delta) * size`: an up-tick counts its size as buying pressure,
//! a down-tick as selling pressure, an unchanged price as nothing.
use tick_common::Tick;

/// OFI of `cur` relative to `prev`.
pub fn compute_ofi(prev: &Tick, cur: &Tick) -> f64 {
    let delta = cur.price - prev.price;
    if delta > 0.0 {
        f64::from(cur.size)
    } else if delta < 0.0 {
        -f64::from(cur.size)
    } else {
        0.0
    }
}

/// Remembers the previous tick so each new tick yields one OFI sample.
#[derive(Debug, Default)]
pub struct OfiTracker {
    prev: Option<Tick>,
}

impl OfiTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// OFI of `tick` against the last one seen; `0.0` for the first tick.
    pub fn update(&mut self, tick: &Tick) -> f64 {
        let ofi = self.prev.as_ref().map_or(0.0, |prev| compute_ofi(prev, tick));
        self.prev = Some(*tick);
        ofi
    }
}
