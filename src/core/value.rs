//! Runtime value model for rows, literals and bound parameters.
//!
//! Values are nullable and typed; `Null` is SQL NULL ("undefined").
//! Comparisons across the numeric types go through [`Numeric`], which
//! promotes operands pairwise instead of collapsing everything to `f64`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::decimal::X6Decimal;

/// Logical column types understood by the range engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    Null,
    Int,
    UInt,
    Decimal,
    Float,
    Bool,
    DateTime,
    Str,
    Binary,
    Ref,
}

/// Operand classification used when matching predicates to typed ranges.
///
/// The four numeric types share one class: a numeric operand can feed an
/// integer-, unsigned- or decimal-typed range through floor/ceiling
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprClass {
    Numeric,
    Bool,
    DateTime,
    Str,
    Binary,
    Ref,
}

impl LogicalType {
    /// Classification of this type, or `None` for `Null` (compatible with
    /// every class).
    pub fn expr_class(&self) -> Option<ExprClass> {
        match self {
            LogicalType::Null => None,
            LogicalType::Int | LogicalType::UInt | LogicalType::Decimal | LogicalType::Float => {
                Some(ExprClass::Numeric)
            }
            LogicalType::Bool => Some(ExprClass::Bool),
            LogicalType::DateTime => Some(ExprClass::DateTime),
            LogicalType::Str => Some(ExprClass::Str),
            LogicalType::Binary => Some(ExprClass::Binary),
            LogicalType::Ref => Some(ExprClass::Ref),
        }
    }
}

/// An object reference: a 64-bit entity identity, or the synthetic
/// maximum-value sentinel.
///
/// `Max` is distinct from every real identity; it compares greater than any
/// entity and equal to itself. It exists so reference-typed ranges have an
/// upper sentinel that no stored reference can exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectRef {
    Entity(u64),
    Max,
}

impl ObjectRef {
    /// Identity payload used when encoding into a key.
    pub fn identity_bits(&self) -> u64 {
        match self {
            ObjectRef::Entity(id) => *id,
            ObjectRef::Max => u64::MAX,
        }
    }
}

impl Ord for ObjectRef {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ObjectRef::Max, ObjectRef::Max) => Ordering::Equal,
            (ObjectRef::Max, _) => Ordering::Greater,
            (_, ObjectRef::Max) => Ordering::Less,
            (ObjectRef::Entity(a), ObjectRef::Entity(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ObjectRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRef::Entity(id) => write!(f, "#{id}"),
            ObjectRef::Max => write!(f, "#max"),
        }
    }
}

/// A nullable runtime value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Int(i64),
    UInt(u64),
    Decimal(X6Decimal),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    Str(String),
    Binary(Vec<u8>),
    Ref(ObjectRef),
}

impl Value {
    /// Returns true for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Logical type of this value.
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Value::Null => LogicalType::Null,
            Value::Int(_) => LogicalType::Int,
            Value::UInt(_) => LogicalType::UInt,
            Value::Decimal(_) => LogicalType::Decimal,
            Value::Float(_) => LogicalType::Float,
            Value::Bool(_) => LogicalType::Bool,
            Value::DateTime(_) => LogicalType::DateTime,
            Value::Str(_) => LogicalType::Str,
            Value::Binary(_) => LogicalType::Binary,
            Value::Ref(_) => LogicalType::Ref,
        }
    }

    /// Numeric view of this value, if it is a non-null numeric.
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Value::Int(v) => Some(Numeric::Int(*v)),
            Value::UInt(v) => Some(Numeric::UInt(*v)),
            Value::Decimal(v) => Some(Numeric::Decimal(*v)),
            Value::Float(v) => Some(Numeric::Float(*v)),
            _ => None,
        }
    }

    /// Builds a value from a JSON scalar.
    ///
    /// Arrays and objects are not column values and return `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Value> {
        match value {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Value::UInt(u))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            serde_json::Value::String(s) => Some(Value::Str(s.clone())),
            _ => None,
        }
    }

    /// Compares two non-null values of compatible types.
    ///
    /// Returns `None` when the types cannot be compared (a classification
    /// defect upstream, surfaced as a type-mismatch error by the caller).
    pub fn compare_non_null(&self, other: &Value) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return Some(a.compare(&b));
        }
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Binary(a), Value::Binary(b)) => Some(a.cmp(b)),
            (Value::Ref(a), Value::Ref(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Value::Str(v) => write!(f, "'{v}'"),
            Value::Binary(v) => {
                write!(f, "x'")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                write!(f, "'")
            }
            Value::Ref(v) => write!(f, "{v}"),
        }
    }
}

/// The numeric sub-universe, for cross-type comparison and floor/ceiling
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    UInt(u64),
    Decimal(X6Decimal),
    Float(f64),
}

impl Numeric {
    /// Total-order comparison across the numeric domains.
    ///
    /// Integer/decimal pairs compare exactly via 128-bit promotion; pairs
    /// involving a float compare as floats with NaN sorting last.
    pub fn compare(&self, other: &Numeric) -> Ordering {
        use Numeric::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (UInt(a), UInt(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.raw().cmp(&b.raw()),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), UInt(b)) => {
                if *a < 0 {
                    Ordering::Less
                } else {
                    (*a as u64).cmp(b)
                }
            }
            (UInt(_), Int(_)) => other.compare(self).reverse(),
            (Int(a), Decimal(d)) => scaled(*a as i128).cmp(&(d.raw() as i128)),
            (Decimal(_), Int(_)) => other.compare(self).reverse(),
            (UInt(a), Decimal(d)) => scaled(*a as i128).cmp(&(d.raw() as i128)),
            (Decimal(_), UInt(_)) => other.compare(self).reverse(),
            (Float(a), _) => a.total_cmp(&other.to_f64()),
            (_, Float(b)) => self.to_f64().total_cmp(b),
        }
    }

    /// Approximate float view, used only against float operands.
    pub fn to_f64(&self) -> f64 {
        match self {
            Numeric::Int(v) => *v as f64,
            Numeric::UInt(v) => *v as f64,
            Numeric::Decimal(v) => v.to_f64(),
            Numeric::Float(v) => *v,
        }
    }
}

fn scaled(whole: i128) -> i128 {
    whole * 1_000_000
}

#[cfg(test)]
mod tests {
    use super::*;

    /// NULL is its own type; everything else reports its logical type.
    #[test]
    fn test_logical_types() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Int(1).logical_type(), LogicalType::Int);
        assert_eq!(
            Value::Ref(ObjectRef::Entity(9)).logical_type(),
            LogicalType::Ref
        );
    }

    /// Cross-domain numeric comparison is exact for integer/decimal pairs.
    #[test]
    fn test_numeric_cross_compare() {
        let a = Numeric::Int(2);
        let b = Numeric::Decimal(X6Decimal::from_f64(2.000001).unwrap());
        assert_eq!(a.compare(&b), Ordering::Less);

        let c = Numeric::UInt(u64::MAX);
        let d = Numeric::Int(-1);
        assert_eq!(c.compare(&d), Ordering::Greater);

        let e = Numeric::Float(2.5);
        let f = Numeric::Int(2);
        assert_eq!(e.compare(&f), Ordering::Greater);
    }

    /// The max sentinel beats every entity and equals itself.
    #[test]
    fn test_object_ref_sentinel() {
        let max = ObjectRef::Max;
        let entity = ObjectRef::Entity(u64::MAX - 1);
        assert_eq!(max.cmp(&max), Ordering::Equal);
        assert_eq!(max.cmp(&entity), Ordering::Greater);
        assert_eq!(entity.cmp(&max), Ordering::Less);
        assert_eq!(max.identity_bits(), u64::MAX);
    }

    /// JSON scalars map onto column values; composites do not.
    #[test]
    fn test_from_json() {
        assert_eq!(
            Value::from_json(&serde_json::json!(42)),
            Some(Value::Int(42))
        );
        assert_eq!(
            Value::from_json(&serde_json::json!("hi")),
            Some(Value::Str("hi".to_string()))
        );
        assert_eq!(Value::from_json(&serde_json::json!(null)), Some(Value::Null));
        assert_eq!(Value::from_json(&serde_json::json!([1, 2])), None);
    }

    /// Mismatched types refuse to compare.
    #[test]
    fn test_mismatch_refuses_compare() {
        let a = Value::Str("x".to_string());
        let b = Value::Int(1);
        assert_eq!(a.compare_non_null(&b), None);
    }
}
