//! Fold candidates: a concrete bound value plus its originating operator.

use std::cmp::Ordering;
use std::fmt;

use crate::expr::ComparisonOperator;
use crate::keys::{KeyBuilder, KeyError};

use super::kind::RangeKind;

/// A nullable bound value with the comparison operator that produced it.
///
/// `None` is the MIN sentinel and sorts below every concrete value. The
/// append-max flag marks variable-length values logically extended with an
/// infinite terminal character; it participates in comparison through the
/// kind's rules.
pub struct RangeValue<K: RangeKind> {
    op: ComparisonOperator,
    value: Option<K::Value>,
    append_max: bool,
}

impl<K: RangeKind> RangeValue<K> {
    /// A fresh MIN-reset lower bound.
    pub fn new() -> Self {
        RangeValue {
            op: ComparisonOperator::GreaterThanOrEqual,
            value: None,
            append_max: false,
        }
    }

    /// Resets to the MIN sentinel (NULL) under `op`.
    pub fn reset_to_min(&mut self, op: ComparisonOperator) {
        self.op = op;
        self.value = None;
        self.append_max = false;
    }

    /// Resets to the type's MAX sentinel under `op`.
    pub fn reset_to_max(&mut self, op: ComparisonOperator) {
        self.op = op;
        self.value = Some(K::max_sentinel());
        self.append_max = K::MAX_USES_APPEND_MAX;
    }

    /// Overwrites operator and value.
    pub fn set_value(&mut self, op: ComparisonOperator, value: K::Value) {
        self.op = op;
        self.value = Some(value);
        self.append_max = false;
    }

    /// Overwrites operator and value with an explicit append-max flag.
    pub fn set_value_extended(&mut self, op: ComparisonOperator, value: K::Value, append_max: bool) {
        self.op = op;
        self.value = Some(value);
        self.append_max = append_max;
    }

    /// Operator that produced this bound.
    pub fn operator(&self) -> ComparisonOperator {
        self.op
    }

    /// Bound value; `None` is the MIN sentinel.
    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }

    /// True when holding the MIN sentinel.
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Append-max flag.
    pub fn append_max(&self) -> bool {
        self.append_max
    }

    /// Strict total order: values first (`None` below any `Some`, the
    /// kind's rules between concrete values), operator rank as the final
    /// tiebreak.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        let values = match (&self.value, &other.value) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => K::compare(a, self.append_max, b, other.append_max),
        };
        values.then_with(|| self.op.rank().cmp(&other.op.rank()))
    }

    /// True when both hold the same underlying value (flag included),
    /// ignoring the operators.
    pub fn same_value(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                K::compare(a, self.append_max, b, other.append_max) == Ordering::Equal
            }
            _ => false,
        }
    }

    /// Copies another bound's state into this one.
    pub fn assign_from(&mut self, other: &Self) {
        self.op = other.op;
        self.value = other.value.clone();
        self.append_max = other.append_max;
    }

    /// Encodes this bound into a key.
    pub fn append_to(&self, builder: &mut KeyBuilder) -> Result<(), KeyError> {
        K::append(builder, self.value.as_ref(), self.append_max)
    }
}

impl<K: RangeKind> Default for RangeValue<K> {
    fn default() -> Self {
        RangeValue::new()
    }
}

impl<K: RangeKind> Clone for RangeValue<K> {
    fn clone(&self) -> Self {
        RangeValue {
            op: self.op,
            value: self.value.clone(),
            append_max: self.append_max,
        }
    }
}

impl<K: RangeKind> fmt::Debug for RangeValue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeValue")
            .field("op", &self.op)
            .field("value", &self.value)
            .field("append_max", &self.append_max)
            .finish()
    }
}
