//! Floor/ceiling conversion of numeric operands into typed range bounds.
//!
//! A numeric operand may not be exactly representable in the indexed
//! column's domain (a decimal compared against an integer column, a float
//! against a decimal column, a negative integer against an unsigned
//! column). Each conversion classifies the operand against the target
//! domain and produces a floor and ceiling; the assignment switch then
//! picks the representation that keeps the bound conservative for the
//! stored operator.

use crate::core::{Numeric, Value, X6Decimal};
use crate::expr::ComparisonOperator;

use super::errors::RangeError;
use super::kind::{DecimalKind, IntKind, RangeKind, UIntKind};
use super::value::RangeValue;

/// An operand classified against a target numeric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounds<V> {
    /// NULL operand (including NaN, which no stored value compares to).
    Null,
    /// Operand below every domain value; carries the domain minimum.
    BelowRange(V),
    /// Operand above every domain value; carries the domain maximum.
    AboveRange(V),
    /// Operand inside the domain; floor == ceiling iff exactly
    /// representable.
    InRange { floor: V, ceiling: V },
}

fn int_bounds(operand: Numeric) -> Bounds<i64> {
    match operand {
        Numeric::Int(v) => Bounds::InRange {
            floor: v,
            ceiling: v,
        },
        Numeric::UInt(v) => {
            if v > i64::MAX as u64 {
                Bounds::AboveRange(i64::MAX)
            } else {
                Bounds::InRange {
                    floor: v as i64,
                    ceiling: v as i64,
                }
            }
        }
        Numeric::Decimal(d) => Bounds::InRange {
            floor: d.floor_i64(),
            ceiling: d.ceil_i64(),
        },
        Numeric::Float(f) => {
            if f.is_nan() {
                Bounds::Null
            } else if f < i64::MIN as f64 {
                Bounds::BelowRange(i64::MIN)
            } else if f >= i64::MAX as f64 {
                Bounds::AboveRange(i64::MAX)
            } else {
                Bounds::InRange {
                    floor: f.floor() as i64,
                    ceiling: f.ceil() as i64,
                }
            }
        }
    }
}

fn uint_bounds(operand: Numeric) -> Bounds<u64> {
    match operand {
        Numeric::Int(v) => {
            if v < 0 {
                Bounds::BelowRange(0)
            } else {
                Bounds::InRange {
                    floor: v as u64,
                    ceiling: v as u64,
                }
            }
        }
        Numeric::UInt(v) => Bounds::InRange {
            floor: v,
            ceiling: v,
        },
        Numeric::Decimal(d) => {
            if d.raw() < 0 {
                Bounds::BelowRange(0)
            } else {
                Bounds::InRange {
                    floor: d.floor_i64() as u64,
                    ceiling: d.ceil_i64() as u64,
                }
            }
        }
        Numeric::Float(f) => {
            if f.is_nan() {
                Bounds::Null
            } else if f < 0.0 {
                Bounds::BelowRange(0)
            } else if f >= u64::MAX as f64 {
                Bounds::AboveRange(u64::MAX)
            } else {
                Bounds::InRange {
                    floor: f.floor() as u64,
                    ceiling: f.ceil() as u64,
                }
            }
        }
    }
}

fn decimal_bounds(operand: Numeric) -> Bounds<X6Decimal> {
    match operand {
        Numeric::Int(v) => match X6Decimal::from_int(v) {
            Some(d) => Bounds::InRange {
                floor: d,
                ceiling: d,
            },
            None if v > 0 => Bounds::AboveRange(X6Decimal::MAX),
            None => Bounds::BelowRange(X6Decimal::MIN),
        },
        Numeric::UInt(v) => {
            let exact = i64::try_from(v).ok().and_then(X6Decimal::from_int);
            match exact {
                Some(d) => Bounds::InRange {
                    floor: d,
                    ceiling: d,
                },
                None => Bounds::AboveRange(X6Decimal::MAX),
            }
        }
        Numeric::Decimal(d) => Bounds::InRange {
            floor: d,
            ceiling: d,
        },
        Numeric::Float(f) => {
            if f.is_nan() {
                return Bounds::Null;
            }
            match (X6Decimal::from_f64_floor(f), X6Decimal::from_f64_ceil(f)) {
                (Some(floor), Some(ceiling)) => Bounds::InRange { floor, ceiling },
                (Some(floor), None) => Bounds::InRange {
                    floor,
                    ceiling: X6Decimal::MAX,
                },
                (None, Some(ceiling)) => Bounds::InRange {
                    floor: X6Decimal::MIN,
                    ceiling,
                },
                (None, None) if f > 0.0 => Bounds::AboveRange(X6Decimal::MAX),
                (None, None) => Bounds::BelowRange(X6Decimal::MIN),
            }
        }
    }
}

/// The assignment switch shared by the three numeric kinds.
///
/// For in-range inexact operands the operator decides which side to keep:
/// `x > 2.5` tightens to `x > 2` (floor, exclusive lower already skips it)
/// while `x >= 2.5` tightens to `x >= 3` (ceiling); symmetrically `<=`
/// keeps the floor and `<` the ceiling. Out-of-range operands either make
/// the predicate vacuous (reset to MIN, yielding an empty or NULL-only
/// interval) or collapse to the domain boundary.
fn assign_bounds<K: RangeKind>(
    op: ComparisonOperator,
    bounds: Bounds<K::Value>,
    out: &mut RangeValue<K>,
) -> Result<(), RangeError> {
    use ComparisonOperator::*;
    match bounds {
        Bounds::Null => {
            out.reset_to_min(op);
            Ok(())
        }
        Bounds::BelowRange(min) => match op {
            Equal | LessThan | LessThanOrEqual => {
                out.reset_to_min(op);
                Ok(())
            }
            GreaterThan | GreaterThanOrEqual => {
                out.set_value(GreaterThanOrEqual, min);
                Ok(())
            }
            Is | IsNot => Err(RangeError::PointOperator(op)),
        },
        Bounds::AboveRange(max) => match op {
            Equal | GreaterThan | GreaterThanOrEqual => {
                out.reset_to_min(op);
                Ok(())
            }
            LessThan | LessThanOrEqual => {
                out.set_value(LessThanOrEqual, max);
                Ok(())
            }
            Is | IsNot => Err(RangeError::PointOperator(op)),
        },
        Bounds::InRange { floor, ceiling } => match op {
            Equal => {
                if floor == ceiling {
                    out.set_value(Equal, floor);
                } else {
                    // Equality against an unrepresentable value never holds.
                    out.reset_to_min(op);
                }
                Ok(())
            }
            GreaterThan | LessThanOrEqual => {
                out.set_value(op, floor);
                Ok(())
            }
            GreaterThanOrEqual | LessThan => {
                out.set_value(op, ceiling);
                Ok(())
            }
            Is | IsNot => Err(RangeError::PointOperator(op)),
        },
    }
}

fn require_numeric<K: RangeKind>(operand: &Value) -> Result<Option<Numeric>, RangeError> {
    if operand.is_null() {
        return Ok(None);
    }
    match operand.as_numeric() {
        Some(n) => Ok(Some(n)),
        None => Err(RangeError::OperandType {
            expected: K::EXPR_CLASS,
            got: operand.logical_type(),
        }),
    }
}

pub(super) fn assign_int(
    op: ComparisonOperator,
    operand: &Value,
    out: &mut RangeValue<IntKind>,
) -> Result<(), RangeError> {
    match require_numeric::<IntKind>(operand)? {
        Some(n) => assign_bounds(op, int_bounds(n), out),
        None => assign_bounds(op, Bounds::Null, out),
    }
}

pub(super) fn assign_uint(
    op: ComparisonOperator,
    operand: &Value,
    out: &mut RangeValue<UIntKind>,
) -> Result<(), RangeError> {
    match require_numeric::<UIntKind>(operand)? {
        Some(n) => assign_bounds(op, uint_bounds(n), out),
        None => assign_bounds(op, Bounds::Null, out),
    }
}

pub(super) fn assign_decimal(
    op: ComparisonOperator,
    operand: &Value,
    out: &mut RangeValue<DecimalKind>,
) -> Result<(), RangeError> {
    match require_numeric::<DecimalKind>(operand)? {
        Some(n) => assign_bounds(op, decimal_bounds(n), out),
        None => assign_bounds(op, Bounds::Null, out),
    }
}
