//! Fixed-point decimal ("X6") representation.
//!
//! Decimal column values are stored as a 64-bit count of micro-units
//! (precision 6). The raw `i64` doubles as the sortable key payload, so the
//! total order of `X6Decimal` is the order of its raw value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Micro-units per whole unit.
const SCALE: i64 = 1_000_000;

/// A precision-6 fixed-point decimal backed by an `i64` micro-unit count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct X6Decimal(i64);

impl X6Decimal {
    /// Smallest representable decimal.
    pub const MIN: X6Decimal = X6Decimal(i64::MIN);
    /// Largest representable decimal.
    pub const MAX: X6Decimal = X6Decimal(i64::MAX);

    /// Wraps a raw micro-unit count.
    pub fn from_raw(raw: i64) -> Self {
        X6Decimal(raw)
    }

    /// Converts a whole integer, if it fits the X6 range.
    pub fn from_int(value: i64) -> Option<Self> {
        value.checked_mul(SCALE).map(X6Decimal)
    }

    /// Converts a float, rounding to the nearest micro-unit.
    ///
    /// Returns `None` for non-finite inputs and values outside the X6 range.
    pub fn from_f64(value: f64) -> Option<Self> {
        Self::convert_f64(value, f64::round)
    }

    /// Converts a float, rounding toward negative infinity.
    pub fn from_f64_floor(value: f64) -> Option<Self> {
        Self::convert_f64(value, f64::floor)
    }

    /// Converts a float, rounding toward positive infinity.
    pub fn from_f64_ceil(value: f64) -> Option<Self> {
        Self::convert_f64(value, f64::ceil)
    }

    fn convert_f64(value: f64, round: fn(f64) -> f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = round(value * SCALE as f64);
        // The i64 boundaries are exact powers of two in f64, so strict
        // comparison against them rejects everything a cast would clamp.
        if scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
            Some(X6Decimal(scaled as i64))
        } else {
            None
        }
    }

    /// Raw micro-unit count (also the sortable key payload).
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Largest integer less than or equal to this decimal.
    pub fn floor_i64(&self) -> i64 {
        self.0.div_euclid(SCALE)
    }

    /// Smallest integer greater than or equal to this decimal.
    pub fn ceil_i64(&self) -> i64 {
        let quotient = self.0.div_euclid(SCALE);
        if self.0.rem_euclid(SCALE) == 0 {
            quotient
        } else {
            quotient + 1
        }
    }

    /// Approximate float value, for cross-domain numeric comparison.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl fmt::Display for X6Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / SCALE as u64;
        let fraction = magnitude % SCALE as u64;
        if fraction == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let digits = format!("{fraction:06}");
            write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raw ordering matches numeric ordering.
    #[test]
    fn test_ordering_matches_raw() {
        let a = X6Decimal::from_f64(-1.5).unwrap();
        let b = X6Decimal::from_f64(2.25).unwrap();
        assert!(a < b);
        assert!(a.raw() < b.raw());
    }

    /// Floor and ceiling agree on whole numbers and straddle fractions.
    #[test]
    fn test_floor_ceil() {
        let d = X6Decimal::from_f64(2.5).unwrap();
        assert_eq!(d.floor_i64(), 2);
        assert_eq!(d.ceil_i64(), 3);

        let n = X6Decimal::from_f64(-2.5).unwrap();
        assert_eq!(n.floor_i64(), -3);
        assert_eq!(n.ceil_i64(), -2);

        let whole = X6Decimal::from_int(7).unwrap();
        assert_eq!(whole.floor_i64(), 7);
        assert_eq!(whole.ceil_i64(), 7);
    }

    /// Out-of-range and non-finite floats are rejected.
    #[test]
    fn test_out_of_range_conversion() {
        assert!(X6Decimal::from_f64(1.0e30).is_none());
        assert!(X6Decimal::from_f64(-1.0e30).is_none());
        assert!(X6Decimal::from_f64(f64::NAN).is_none());
        assert!(X6Decimal::from_f64(f64::INFINITY).is_none());
        assert!(X6Decimal::from_f64(123.456789).is_some());
    }

    /// Display trims trailing fraction zeros and keeps signs.
    #[test]
    fn test_display() {
        assert_eq!(X6Decimal::from_f64(1.5).unwrap().to_string(), "1.5");
        assert_eq!(X6Decimal::from_f64(-0.25).unwrap().to_string(), "-0.25");
        assert_eq!(X6Decimal::from_int(42).unwrap().to_string(), "42");
    }
}
