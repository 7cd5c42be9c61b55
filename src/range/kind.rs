//! Typed range kinds.
//!
//! One zero-sized kind per logical column type binds together the value
//! representation, the MAX sentinel, the comparison rules (including the
//! append-max tiebreak for variable-length types), the key encoding, and
//! the operand assignment logic. Everything downstream (`RangeValue`,
//! `RangePoint`, `DynamicRange`) is generic over a kind instead of being
//! written once per type.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::core::{ExprClass, LogicalType, ObjectRef, Value, X6Decimal};
use crate::expr::ComparisonOperator;
use crate::keys::{KeyBuilder, KeyError};

use super::errors::RangeError;
use super::numeric;
use super::point::{AnyRangePoint, RangePoint};
use super::value::RangeValue;

/// Binding between a logical column type and its range machinery.
pub trait RangeKind: Sized + 'static {
    /// Concrete value representation for this kind.
    type Value: Clone + std::fmt::Debug + PartialEq;

    /// Logical type this kind indexes.
    const LOGICAL_TYPE: LogicalType;

    /// Operand class this kind accepts.
    const EXPR_CLASS: ExprClass;

    /// Whether the MAX sentinel is expressed through the append-max flag
    /// rather than a largest concrete value.
    const MAX_USES_APPEND_MAX: bool = false;

    /// The type's maximum sentinel value.
    fn max_sentinel() -> Self::Value;

    /// Compares two values together with their append-max flags.
    fn compare(a: &Self::Value, a_max: bool, b: &Self::Value, b_max: bool) -> Ordering;

    /// Appends a value (or NULL) to a key.
    fn append(
        builder: &mut KeyBuilder,
        value: Option<&Self::Value>,
        append_max: bool,
    ) -> Result<(), KeyError>;

    /// Stores an evaluated operand into a range value under `op`,
    /// applying this kind's domain conversion rules. A NULL operand
    /// resets to MIN with the operator preserved.
    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError>;

    /// Converts an untyped extracted point into a typed one, when the
    /// operand class is compatible. NULL-classed operands fit any kind.
    fn accept(point: &AnyRangePoint) -> Option<RangePoint<Self>> {
        match point.class() {
            None => {}
            Some(class) if class == Self::EXPR_CLASS => {}
            Some(_) => return None,
        }
        Some(RangePoint::new(point.operator(), point.expression().cloned()))
    }
}

fn scalar_compare<V: Ord>(a: &V, b: &V) -> Ordering {
    a.cmp(b)
}

/// Exact-type assignment shared by the non-numeric kinds: the operand
/// must already have this kind's logical type.
fn assign_exact<K, F>(
    op: ComparisonOperator,
    operand: &Value,
    out: &mut RangeValue<K>,
    extract: F,
) -> Result<(), RangeError>
where
    K: RangeKind,
    F: FnOnce(&Value) -> Option<K::Value>,
{
    match op {
        ComparisonOperator::Is | ComparisonOperator::IsNot => {
            return Err(RangeError::PointOperator(op))
        }
        _ => {}
    }
    if operand.is_null() {
        out.reset_to_min(op);
        return Ok(());
    }
    match extract(operand) {
        Some(value) => {
            out.set_value(op, value);
            Ok(())
        }
        None => Err(RangeError::OperandType {
            expected: K::EXPR_CLASS,
            got: operand.logical_type(),
        }),
    }
}

/// Signed 64-bit integer columns.
pub struct IntKind;

impl RangeKind for IntKind {
    type Value = i64;
    const LOGICAL_TYPE: LogicalType = LogicalType::Int;
    const EXPR_CLASS: ExprClass = ExprClass::Numeric;

    fn max_sentinel() -> i64 {
        i64::MAX
    }

    fn compare(a: &i64, _: bool, b: &i64, _: bool) -> Ordering {
        scalar_compare(a, b)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&i64>,
        _append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_int(value.copied())
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        numeric::assign_int(op, operand, out)
    }
}

/// Unsigned 64-bit integer columns.
pub struct UIntKind;

impl RangeKind for UIntKind {
    type Value = u64;
    const LOGICAL_TYPE: LogicalType = LogicalType::UInt;
    const EXPR_CLASS: ExprClass = ExprClass::Numeric;

    fn max_sentinel() -> u64 {
        u64::MAX
    }

    fn compare(a: &u64, _: bool, b: &u64, _: bool) -> Ordering {
        scalar_compare(a, b)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&u64>,
        _append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_uint(value.copied())
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        numeric::assign_uint(op, operand, out)
    }
}

/// Fixed-point decimal columns.
pub struct DecimalKind;

impl RangeKind for DecimalKind {
    type Value = X6Decimal;
    const LOGICAL_TYPE: LogicalType = LogicalType::Decimal;
    const EXPR_CLASS: ExprClass = ExprClass::Numeric;

    fn max_sentinel() -> X6Decimal {
        X6Decimal::MAX
    }

    fn compare(a: &X6Decimal, _: bool, b: &X6Decimal, _: bool) -> Ordering {
        scalar_compare(a, b)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&X6Decimal>,
        _append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_decimal(value.copied())
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        numeric::assign_decimal(op, operand, out)
    }
}

/// Boolean columns. False sorts before true; MAX is true.
pub struct BoolKind;

impl RangeKind for BoolKind {
    type Value = bool;
    const LOGICAL_TYPE: LogicalType = LogicalType::Bool;
    const EXPR_CLASS: ExprClass = ExprClass::Bool;

    fn max_sentinel() -> bool {
        true
    }

    fn compare(a: &bool, _: bool, b: &bool, _: bool) -> Ordering {
        scalar_compare(a, b)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&bool>,
        _append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_bool(value.copied())
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        assign_exact(op, operand, out, |v| match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        })
    }
}

/// Timestamp columns, compared and encoded at microsecond precision.
pub struct DateTimeKind;

impl RangeKind for DateTimeKind {
    type Value = DateTime<Utc>;
    const LOGICAL_TYPE: LogicalType = LogicalType::DateTime;
    const EXPR_CLASS: ExprClass = ExprClass::DateTime;

    fn max_sentinel() -> DateTime<Utc> {
        DateTime::<Utc>::MAX_UTC
    }

    fn compare(a: &DateTime<Utc>, _: bool, b: &DateTime<Utc>, _: bool) -> Ordering {
        scalar_compare(a, b)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&DateTime<Utc>>,
        _append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_datetime(value.copied())
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        assign_exact(op, operand, out, |v| match v {
            Value::DateTime(t) => Some(*t),
            _ => None,
        })
    }
}

/// String columns.
///
/// The MAX sentinel is the empty string with the append-max flag: every
/// real string extends the empty prefix, so "empty plus an infinite
/// terminal character" bounds them all from above.
pub struct StrKind;

impl RangeKind for StrKind {
    type Value = String;
    const LOGICAL_TYPE: LogicalType = LogicalType::Str;
    const EXPR_CLASS: ExprClass = ExprClass::Str;
    const MAX_USES_APPEND_MAX: bool = true;

    fn max_sentinel() -> String {
        String::new()
    }

    fn compare(a: &String, a_max: bool, b: &String, b_max: bool) -> Ordering {
        compare_with_infinite_tail(a.as_bytes(), a_max, b.as_bytes(), b_max)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&String>,
        append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_str(value.map(String::as_str), append_max)
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        assign_exact(op, operand, out, |v| match v {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        })
    }
}

/// Binary columns, with the same infinite-tail convention as strings.
pub struct BinaryKind;

impl RangeKind for BinaryKind {
    type Value = Vec<u8>;
    const LOGICAL_TYPE: LogicalType = LogicalType::Binary;
    const EXPR_CLASS: ExprClass = ExprClass::Binary;
    const MAX_USES_APPEND_MAX: bool = true;

    fn max_sentinel() -> Vec<u8> {
        Vec::new()
    }

    fn compare(a: &Vec<u8>, a_max: bool, b: &Vec<u8>, b_max: bool) -> Ordering {
        compare_with_infinite_tail(a, a_max, b, b_max)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&Vec<u8>>,
        append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_bytes(value.map(Vec::as_slice), append_max)
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        assign_exact(op, operand, out, |v| match v {
            Value::Binary(b) => Some(b.clone()),
            _ => None,
        })
    }
}

/// Object-reference columns. The MAX sentinel is [`ObjectRef::Max`].
pub struct RefKind;

impl RangeKind for RefKind {
    type Value = ObjectRef;
    const LOGICAL_TYPE: LogicalType = LogicalType::Ref;
    const EXPR_CLASS: ExprClass = ExprClass::Ref;

    fn max_sentinel() -> ObjectRef {
        ObjectRef::Max
    }

    fn compare(a: &ObjectRef, _: bool, b: &ObjectRef, _: bool) -> Ordering {
        a.cmp(b)
    }

    fn append(
        builder: &mut KeyBuilder,
        value: Option<&ObjectRef>,
        _append_max: bool,
    ) -> Result<(), KeyError> {
        builder.append_ref(value.copied())
    }

    fn assign(
        op: ComparisonOperator,
        operand: &Value,
        out: &mut RangeValue<Self>,
    ) -> Result<(), RangeError> {
        assign_exact(op, operand, out, |v| match v {
            Value::Ref(r) => Some(*r),
            _ => None,
        })
    }
}

/// Byte comparison where a set append-max flag stands for an infinite
/// terminal character: a flagged value sorts after every value it is a
/// prefix of, and after its unflagged self.
fn compare_with_infinite_tail(a: &[u8], a_max: bool, b: &[u8], b_max: bool) -> Ordering {
    match a.cmp(b) {
        Ordering::Equal => a_max.cmp(&b_max),
        Ordering::Less if a_max && b.starts_with(a) => Ordering::Greater,
        Ordering::Greater if b_max && a.starts_with(b) => Ordering::Less,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The append-max flag sorts a prefix above its extensions.
    #[test]
    fn test_infinite_tail_compare() {
        let ab = b"ab".to_vec();
        let abc = b"abc".to_vec();
        assert_eq!(
            compare_with_infinite_tail(&ab, false, &abc, false),
            Ordering::Less
        );
        assert_eq!(
            compare_with_infinite_tail(&ab, true, &abc, false),
            Ordering::Greater
        );
        assert_eq!(
            compare_with_infinite_tail(&ab, true, &ab, false),
            Ordering::Greater
        );
        // Unrelated values are unaffected by the flag.
        assert_eq!(
            compare_with_infinite_tail(b"b", true, b"c", false),
            Ordering::Less
        );
    }

    /// The string MAX sentinel bounds every real string.
    #[test]
    fn test_str_max_sentinel() {
        let max = StrKind::max_sentinel();
        assert_eq!(
            StrKind::compare(&max, true, &"zzz".to_string(), false),
            Ordering::Greater
        );
    }

    /// Kind acceptance filters on operand class.
    #[test]
    fn test_accept_filters_class() {
        use crate::core::Value;
        use crate::expr::ScalarExpr;

        let numeric = AnyRangePoint::new(
            ComparisonOperator::GreaterThan,
            Some(ScalarExpr::literal(Value::Int(5))),
            Some(ExprClass::Numeric),
        );
        assert!(IntKind::accept(&numeric).is_some());
        assert!(DecimalKind::accept(&numeric).is_some());
        assert!(StrKind::accept(&numeric).is_none());

        let null_classed = AnyRangePoint::new(
            ComparisonOperator::Equal,
            Some(ScalarExpr::literal(Value::Null)),
            None,
        );
        assert!(StrKind::accept(&null_classed).is_some());
    }
}
