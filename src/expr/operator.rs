//! Comparison operators and their deterministic rank order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The comparison operators understood by range construction.
///
/// `Is` and `IsNot` are the NULL tests (`IS NULL`, `IS NOT NULL`). Each
/// operator carries a fixed integer rank used as the final tiebreak when two
/// range values hold the same underlying value; the rank order is part of
/// the fold contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Is,
    IsNot,
}

impl ComparisonOperator {
    /// Tiebreak rank. Lower ranks sort first among equal values.
    ///
    /// The inequality ranks are ordered by bound tightness: among equal
    /// values an exclusive lower bound (`>`) outranks an inclusive one
    /// (`>=`), and an exclusive upper bound (`<`) ranks below an inclusive
    /// one (`<=`). This is what lets a synthetic `> NULL` point displace
    /// the reset `>= NULL` lower bound during the fold.
    pub fn rank(&self) -> u8 {
        match self {
            ComparisonOperator::Equal => 0,
            ComparisonOperator::GreaterThanOrEqual => 1,
            ComparisonOperator::GreaterThan => 2,
            ComparisonOperator::LessThan => 3,
            ComparisonOperator::LessThanOrEqual => 4,
            ComparisonOperator::Is => 5,
            ComparisonOperator::IsNot => 6,
        }
    }

    /// SQL spelling, for diagnostics and explain output.
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::Is => "IS",
            ComparisonOperator::IsNot => "IS NOT",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
