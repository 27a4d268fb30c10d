//! EWMA trading signal over the OFI stream.
//!
//! Each OFI sample updates `ewma = alpha * ofi + (1 - alpha) * ewma`, starting
//! from zero. The signal is `Buy` while the average is above `threshold`,
//! `Sell` while it is below `-threshold`, and `Hold` otherwise.
use std::fmt;

use strum_macros::Display;
use tick_common::TickError;

/// Smoothing factor used when none is configured.
pub const DEFAULT_ALPHA: f64 = 0.15;
/// Signal threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 40.0;

/// Trading action derived from the smoothed imbalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predictor {
    alpha: f64,
    threshold: f64,
    ewma: f64,
}

impl Default for Predictor {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            threshold: DEFAULT_THRESHOLD,
            ewma: 0.0,
        }
    }
}

impl Predictor {
    /// `alpha` must lie in `(0, 1]`; `threshold` must be finite and non-negative.
    pub fn new(alpha: f64, threshold: f64) -> Result<Self, TickError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(TickError::Config(format!("alpha must be in (0, 1], got {}", alpha)));
        }
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(TickError::Config(format!(
                "threshold must be a non-negative number, got {}",
                threshold
            )));
        }
        Ok(Self {
            alpha,
            threshold,
            ewma: 0.0,
        })
    }

    /// Fold one OFI sample into the average and classify the result.
    pub fn process_sample(&mut self, ofi: f64) -> Signal {
        self.ewma = self.alpha * ofi + (1.0 - self.alpha) * self.ewma;
        if self.ewma > self.threshold {
            Signal::Buy
        } else if self.ewma < -self.threshold {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    pub fn ewma(&self) -> f64 {
        self.ewma
    }
}

/// Outcome of running one tick through OFI and the predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub sequence: u64,
    pub signal: Signal,
    pub ewma: f64,
    pub ofi: f64,
    /// From datagram arrival to the signal being known.
    pub recv_to_decision_us: f64,
    /// Emitter timestamp to datagram arrival.
    pub src_to_recv_us: f64,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ewma={:.2} ofi={:.2} recv->dec(us)={:.2} src->recv(us)={:.2}",
            self.sequence, self.signal, self.ewma, self.ofi, self.recv_to_decision_us, self.src_to_recv_us
        )
    }
}
