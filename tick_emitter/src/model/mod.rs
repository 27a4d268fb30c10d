//! Domain models for the tick emitter.
//!
//! - `generator` — the random-walk state machine that produces `Tick` values.

pub mod generator;
