//! Synthetic tick generator.
//!
//! `TickGenerator` owns the whole mutable state of the stream: the next
//! sequence number, the running price and the random number generator. It is
//! constructed explicitly and owned by the control loop, so several independent
//! (and, when seeded, reproducible) instances can coexist.
//!
//! Price model: an unbounded Gaussian random walk. Each tick adds a step drawn
//! from `N(DRIFT_MEAN, DRIFT_STD_DEV)`, i.e. a slow downward drift with noise.
//! The price is never clamped and may become negative.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tick_common::Tick;
use tick_common::tick::{MAX_SIZE, MIN_SIZE};

/// Price every stream starts from.
pub const INITIAL_PRICE: f64 = 100.0;
/// Mean of the per-tick price step.
pub const DRIFT_MEAN: f64 = -0.5;
/// Standard deviation of the per-tick price step.
pub const DRIFT_STD_DEV: f64 = 0.5;

/// Random-walk tick source.
pub struct TickGenerator<R: Rng = StdRng> {
    sequence: u64,
    price: f64,
    rng: R,
}

impl TickGenerator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible generator: the same seed yields the same prices and sizes.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TickGenerator<R> {
    /// Start a fresh stream (`sequence = 0`, `price = INITIAL_PRICE`) on `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            sequence: 0,
            price: INITIAL_PRICE,
            rng,
        }
    }

    /// Sequence number the next tick will carry.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Last price produced (or `INITIAL_PRICE` before the first tick).
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Advance the random walk by one step and return the new price.
    pub fn next_price(&mut self) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        self.price += DRIFT_MEAN + DRIFT_STD_DEV * z;
        self.price
    }

    /// Draw a size uniformly from `[MIN_SIZE, MAX_SIZE]`.
    pub fn next_size(&mut self) -> u32 {
        self.rng.random_range(MIN_SIZE..=MAX_SIZE)
    }

    /// Produce the next tick stamped with `timestamp` and advance the sequence.
    pub fn next_tick(&mut self, timestamp: f64) -> Tick {
        let price = self.next_price();
        let size = self.next_size();
        let tick = Tick {
            sequence: self.sequence,
            timestamp,
            price,
            size,
        };
        self.sequence += 1;
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_initial_state() {
        let generator = TickGenerator::seeded(1);
        assert_eq!(generator.sequence(), 0);
        assert_eq!(generator.price(), INITIAL_PRICE);
    }

    #[test]
    fn sequence_is_gapless_from_zero() {
        let mut generator = TickGenerator::seeded(7);
        let sequences: Vec<u64> = (0..1_000).map(|_| generator.next_tick(0.0).sequence).collect();
        let expected: Vec<u64> = (0..1_000).collect();
        assert_eq!(sequences, expected);
        assert_eq!(generator.sequence(), 1_000);
    }

    #[test]
    fn sizes_stay_in_bounds_and_cover_both_ends() {
        let mut generator = TickGenerator::seeded(11);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..200_000 {
            let size = generator.next_size();
            assert!((MIN_SIZE..=MAX_SIZE).contains(&size), "size {} out of range", size);
            seen_min |= size == MIN_SIZE;
            seen_max |= size == MAX_SIZE;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn price_steps_follow_drift_distribution() {
        const STEPS: usize = 100_000;
        let mut generator = TickGenerator::seeded(42);
        let mut previous = generator.price();
        let mut deltas = Vec::with_capacity(STEPS);
        for _ in 0..STEPS {
            let price = generator.next_price();
            deltas.push(price - previous);
            previous = price;
        }

        let n = deltas.len() as f64;
        let mean = deltas.iter().sum::<f64>() / n;
        let variance = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std_dev = variance.sqrt();

        assert!((mean - DRIFT_MEAN).abs() < 0.01, "mean {}", mean);
        assert!((std_dev - DRIFT_STD_DEV).abs() < 0.01, "std dev {}", std_dev);
    }

    #[test]
    fn price_is_not_clamped() {
        let mut generator = TickGenerator::seeded(3);
        // 100.0 drifting by -0.5 per step is well below zero after 1000 steps.
        for _ in 0..1_000 {
            generator.next_price();
        }
        assert!(generator.price() < 0.0);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = TickGenerator::seeded(2024);
        let mut b = TickGenerator::seeded(2024);
        for _ in 0..100 {
            assert_eq!(a.next_tick(1.0), b.next_tick(1.0));
        }
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let mut a = TickGenerator::seeded(1);
        let mut b = TickGenerator::seeded(2);
        for _ in 0..10 {
            a.next_tick(0.0);
        }
        assert_eq!(a.sequence(), 10);
        assert_eq!(b.sequence(), 0);
        assert_eq!(b.next_tick(0.0).sequence, 0);
    }
}
