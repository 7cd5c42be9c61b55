//! Range construction and folding.
//!
//! A [`DynamicRange`] collects the comparison predicates that constrain one
//! indexed column, rewrites them into canonical range points at insertion,
//! and at execution folds the points into the tightest known lower and
//! upper bound, encoded into index keys.

pub mod dynamic;
pub mod errors;
pub mod kind;
pub mod numeric;
pub mod point;
pub mod value;

pub use dynamic::{build_column_range, DynamicRange};
pub use errors::RangeError;
pub use kind::{
    BinaryKind, BoolKind, DateTimeKind, DecimalKind, IntKind, RangeKind, RefKind, StrKind,
    UIntKind,
};
pub use point::{AnyRangePoint, RangePoint};
pub use value::RangeValue;

/// Scan direction requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// The shape of a folded range, with the operators the scan should apply
/// at each endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeScan {
    /// Lower and upper bound coincide: a single-key equality probe.
    Equality,
    /// A two-endpoint scan between the first and second key.
    Range {
        first_op: crate::expr::ComparisonOperator,
        second_op: crate::expr::ComparisonOperator,
    },
}

/// Tunables for range construction.
#[derive(Debug, Clone)]
pub struct RangeConfig {
    /// Capacity ceiling for each endpoint key.
    pub max_key_bytes: usize,
    /// Emit a trace event for every built range.
    pub trace_builds: bool,
}

impl Default for RangeConfig {
    fn default() -> Self {
        RangeConfig {
            max_key_bytes: crate::keys::MAX_KEY_BYTES,
            trace_builds: false,
        }
    }
}

impl RangeConfig {
    /// Default limits with build tracing on.
    pub fn with_tracing() -> Self {
        RangeConfig {
            trace_builds: true,
            ..RangeConfig::default()
        }
    }

    /// An endpoint key builder sized to this configuration.
    pub fn key_builder(&self) -> crate::keys::KeyBuilder {
        crate::keys::KeyBuilder::with_capacity(self.max_key_bytes)
    }
}
