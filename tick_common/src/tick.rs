//! Tick data model and its CSV line codec.
//!
//! A `Tick` is the payload carried by one datagram. On the wire it is a single
//! UTF-8 line:
//!
//! ```text
//! <sequence>,<timestamp, 9 decimals>,<price, 6 decimals>,<size>\n
//! ```
//!
//! e.g. `0,1700000000.123456789,99.623140,742\n`.
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TickError;

/// Smallest size a tick may carry.
pub const MIN_SIZE: u32 = 1;
/// Largest size a tick may carry.
pub const MAX_SIZE: u32 = 1000;

const FIELD_COUNT: usize = 4;

/// Wall-clock seconds since the Unix epoch with sub-second precision.
///
/// Used both to stamp ticks and to stamp their arrival.
pub fn now_secs() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) * 1e-9
}

/// Parse one numeric field. Signs other than `-` and non-finite values are
/// never written by the emitter, so they are rejected.
fn parse_field<T>(name: &str, field: &str) -> Result<T, TickError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if field.starts_with('+') {
        return Err(TickError::Parse(format!("{} {:?}: explicit '+' sign", name, field)));
    }
    field
        .parse::<T>()
        .map_err(|e| TickError::Parse(format!("{} {:?}: {}", name, field, e)))
}

fn parse_finite(name: &str, field: &str) -> Result<f64, TickError> {
    let value: f64 = parse_field(name, field)?;
    if !value.is_finite() {
        return Err(TickError::Parse(format!("{} {:?}: not a finite number", name, field)));
    }
    Ok(value)
}

/// One simulated market event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Position in the stream, starting at 0.
    pub sequence: u64,
    /// Emission time in seconds since the Unix epoch.
    pub timestamp: f64,
    /// Running simulated price.
    pub price: f64,
    /// Simulated trade size in `[MIN_SIZE, MAX_SIZE]`.
    pub size: u32,
}

impl Tick {
    /// Render the tick as a newline-terminated wire line.
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    /// Encode the tick to the datagram payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_line().into_bytes()
    }

    /// Decode a datagram payload.
    pub fn from_bytes(payload: &[u8]) -> Result<Self, TickError> {
        let text = std::str::from_utf8(payload).map_err(|e| TickError::Parse(e.to_string()))?;
        text.parse()
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:.9},{:.6},{}",
            self.sequence, self.timestamp, self.price, self.size
        )
    }
}

impl FromStr for Tick {
    type Err = TickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(TickError::Parse(format!(
                "expected {} fields, got {}: {:?}",
                FIELD_COUNT,
                fields.len(),
                line
            )));
        }

        let sequence: u64 = parse_field("sequence", fields[0])?;
        let timestamp = parse_finite("timestamp", fields[1])?;
        let price = parse_finite("price", fields[2])?;
        let size: u32 = parse_field("size", fields[3])?;

        Ok(Tick {
            sequence,
            timestamp,
            price,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tick {
        Tick {
            sequence: 0,
            timestamp: 1_700_000_000.25,
            price: 99.62314,
            size: 742,
        }
    }

    #[test]
    fn formats_wire_line() {
        assert_eq!(sample().to_line(), "0,1700000000.250000000,99.623140,742\n");
    }

    #[test]
    fn negative_price_keeps_sign_and_precision() {
        let tick = Tick {
            price: -3.5,
            ..sample()
        };
        assert_eq!(tick.to_line(), "0,1700000000.250000000,-3.500000,742\n");
    }

    #[test]
    fn line_splits_into_four_fields_that_parse_back() {
        let tick = Tick {
            sequence: 123_456,
            timestamp: 1_700_000_123.987_654,
            price: 87.123_456_789,
            size: 1000,
        };
        let line = tick.to_line();
        let fields: Vec<&str> = line.trim_end().split(',').collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].parse::<u64>().unwrap(), tick.sequence);

        let price: f64 = fields[2].parse().unwrap();
        let rounded = (tick.price * 1e6).round() / 1e6;
        assert!((price - rounded).abs() < 1e-9, "{} vs {}", price, rounded);
    }

    #[test]
    fn parses_example_datagram() {
        let tick = Tick::from_bytes(b"0,1700000000.123456789,99.623140,742\n").unwrap();
        assert_eq!(tick.sequence, 0);
        assert_eq!(tick.size, 742);
        assert!((tick.price - 99.62314).abs() < 1e-12);
        assert!((tick.timestamp - 1_700_000_000.123_456_789).abs() < 1e-6);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = "1,2.0,3.0".parse::<Tick>().unwrap_err();
        assert!(matches!(err, TickError::Parse(_)));
        assert!("1,2.0,3.0,4,5".parse::<Tick>().is_err());
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!("x,2.0,3.0,4".parse::<Tick>().is_err());
        assert!("1,2.0,abc,4".parse::<Tick>().is_err());
        assert!("1,2.0,3.0,-4".parse::<Tick>().is_err());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        for line in ["1,nan,100.0,4", "1,1.0,inf,4", "1,-inf,1.0,4", "1,1.0,NaN,4"] {
            let err = line.parse::<Tick>().unwrap_err();
            assert!(matches!(err, TickError::Parse(_)), "{} accepted", line);
        }
    }

    #[test]
    fn rejects_explicit_plus_sign() {
        assert!("+1,1.0,1.0,4".parse::<Tick>().is_err());
        assert!("1,+1.0,1.0,4".parse::<Tick>().is_err());
        assert!("1,1.0,+1.0,4".parse::<Tick>().is_err());
        assert!("1,1.0,1.0,+4".parse::<Tick>().is_err());
    }

    #[test]
    fn accepts_negative_price() {
        let tick = "7,1.5,-12.250000,3\n".parse::<Tick>().unwrap();
        assert_eq!(tick.price, -12.25);
    }

    #[test]
    fn now_secs_is_after_2020() {
        assert!(now_secs() > 1_577_836_800.0);
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(Tick::from_bytes(&[0xff, 0xfe, b',']).is_err());
    }
}
