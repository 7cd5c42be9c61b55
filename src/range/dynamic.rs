//! Dynamic range: collects the range points for one indexed column,
//! folds them per row into the tightest `[lower, upper]` bound, and
//! encodes the bound into index keys.

use std::sync::Arc;

use crate::core::Row;
use crate::expr::{BoolExpr, Comparison, ComparisonOperator, ParamSet};
use crate::keys::KeyBuilder;
use crate::observability::{Logger, Severity};

use super::errors::RangeError;
use super::kind::RangeKind;
use super::point::RangePoint;
use super::value::RangeValue;
use super::{RangeConfig, RangeScan, SortOrder};

/// The fold state for one indexed column.
///
/// Points are canonicalized at insertion so the fold only ever sees the
/// four inequality operators; anything else reaching it is an upstream
/// classification defect.
pub struct DynamicRange<K: RangeKind> {
    points: Vec<RangePoint<K>>,
    residual: Option<BoolExpr>,
    lower: RangeValue<K>,
    upper: RangeValue<K>,
}

impl<K: RangeKind> DynamicRange<K> {
    /// An empty range: folds to the full `[MIN, MAX]` interval.
    pub fn new() -> Self {
        DynamicRange {
            points: Vec::new(),
            residual: None,
            lower: RangeValue::new(),
            upper: RangeValue::new(),
        }
    }

    /// Number of canonical points held.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Canonical points, for diagnostics.
    pub fn points(&self) -> &[RangePoint<K>] {
        &self.points
    }

    /// Inserts a point, rewriting it into canonical inequality form:
    /// `=` splits into `>=` and `<=` on the same operand; `IS` becomes an
    /// upper bound at NULL; `IS NOT` a lower bound strictly above NULL;
    /// `<`/`<=` additionally get a synthetic `>` NULL point, since a
    /// value comparison is never true for a NULL column.
    pub fn add_range_point(&mut self, point: RangePoint<K>) {
        match point.operator() {
            ComparisonOperator::Equal => {
                let (lower, upper) = point.split_equality();
                self.points.push(lower);
                self.points.push(upper);
            }
            ComparisonOperator::Is => {
                self.points
                    .push(RangePoint::without_expr(ComparisonOperator::LessThanOrEqual));
            }
            ComparisonOperator::IsNot => {
                self.points.push(RangePoint::null_exclusion());
            }
            ComparisonOperator::LessThan | ComparisonOperator::LessThanOrEqual => {
                self.points.push(point);
                self.points.push(RangePoint::null_exclusion());
            }
            ComparisonOperator::GreaterThan | ComparisonOperator::GreaterThanOrEqual => {
                self.points.push(point);
            }
        }
    }

    /// Greedily consumes compatible predicates from the front of
    /// `conditions`: each one that extracts a range point of this kind is
    /// removed, canonicalized into the point list, and ANDed into the
    /// residual filter. Stops at the first incompatible predicate.
    /// Returns the number of predicates consumed.
    pub fn create_range_point_list(
        &mut self,
        conditions: &mut Vec<Comparison>,
        path: &str,
    ) -> usize {
        let mut consumed = 0;
        while let Some(predicate) = conditions.first() {
            let typed = predicate
                .create_range_point(path)
                .and_then(|any| K::accept(&any));
            let point = match typed {
                Some(point) => point,
                None => break,
            };
            let predicate = conditions.remove(0);
            self.add_range_point(point);
            let residual = self.residual.take().unwrap_or(BoolExpr::True);
            self.residual = Some(residual.and(BoolExpr::comparison(predicate)));
            consumed += 1;
        }
        consumed
    }

    /// Folds every point against `row` and encodes the resulting bound.
    ///
    /// On an equality collapse only `first_key` receives the bound value;
    /// otherwise `second_key` first receives a copy of `first_key`'s
    /// already-written prefix (the shared leading columns of a composite
    /// key) and then the two bounds diverge. Descending scans swap both
    /// the key assignment and the reported endpoint operators.
    pub fn evaluate(
        &mut self,
        row: &Row,
        sort_order: SortOrder,
        first_key: &mut KeyBuilder,
        second_key: &mut KeyBuilder,
    ) -> Result<RangeScan, RangeError> {
        self.lower.reset_to_min(ComparisonOperator::GreaterThanOrEqual);
        self.upper.reset_to_max(ComparisonOperator::LessThanOrEqual);

        for point in self.points.iter_mut() {
            let candidate = point.evaluate(row)?;
            match candidate.operator() {
                ComparisonOperator::LessThan | ComparisonOperator::LessThanOrEqual => {
                    if candidate.compare_to(&self.upper).is_lt() {
                        self.upper.assign_from(candidate);
                    }
                }
                ComparisonOperator::GreaterThan | ComparisonOperator::GreaterThanOrEqual => {
                    if candidate.compare_to(&self.lower).is_gt() {
                        self.lower.assign_from(candidate);
                    }
                }
                other => return Err(RangeError::FoldOperator(other)),
            }
        }

        if self.lower.same_value(&self.upper) {
            self.lower.append_to(first_key)?;
            return Ok(RangeScan::Equality);
        }

        first_key.copy_to(second_key)?;
        let (first, second) = match sort_order {
            SortOrder::Ascending => (&self.lower, &self.upper),
            SortOrder::Descending => (&self.upper, &self.lower),
        };
        first.append_to(first_key)?;
        second.append_to(second_key)?;
        Ok(RangeScan::Range {
            first_op: first.operator(),
            second_op: second.operator(),
        })
    }

    /// Writes a degenerate full range without evaluating any points, for
    /// columns with no predicates that must still bound a composite-index
    /// scan. The endpoint operators are supplied by the caller.
    pub fn create_fill_range(
        &mut self,
        first_key: &mut KeyBuilder,
        second_key: &mut KeyBuilder,
        first_op: ComparisonOperator,
        second_op: ComparisonOperator,
    ) -> Result<(), RangeError> {
        self.lower.reset_to_min(first_op);
        self.upper.reset_to_max(second_op);
        first_key.copy_to(second_key)?;
        self.lower.append_to(first_key)?;
        self.upper.append_to(second_key)?;
        Ok(())
    }

    /// Deep-clones the point list against a fresh parameter set. The
    /// residual filter is not carried over; the caller's predicate
    /// rewrite pass tracks residuals per binding.
    pub fn clone_with(&self, params: &Arc<ParamSet>) -> Self {
        DynamicRange {
            points: self.points.iter().map(|p| p.clone_with(params)).collect(),
            residual: None,
            lower: RangeValue::new(),
            upper: RangeValue::new(),
        }
    }

    /// The accumulated residual filter, `TRUE` when nothing was consumed,
    /// so callers can AND it in unconditionally.
    pub fn residual_expression(&self) -> BoolExpr {
        self.residual.clone().unwrap_or(BoolExpr::True)
    }
}

impl<K: RangeKind> Default for DynamicRange<K> {
    fn default() -> Self {
        DynamicRange::new()
    }
}

/// Builds the range for one column from a predicate conjunction,
/// consuming what it can and logging the outcome when tracing is on.
pub fn build_column_range<K: RangeKind>(
    conditions: &mut Vec<Comparison>,
    path: &str,
    config: &RangeConfig,
) -> DynamicRange<K> {
    let mut range = DynamicRange::new();
    let consumed = range.create_range_point_list(conditions, path);
    if config.trace_builds {
        Logger::log(
            "range_built",
            Severity::Trace,
            &[
                ("column", path.to_string()),
                ("consumed", consumed.to_string()),
                ("points", range.point_count().to_string()),
            ],
        );
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::expr::ScalarExpr;
    use crate::range::kind::IntKind;

    fn keys() -> (KeyBuilder, KeyBuilder) {
        (KeyBuilder::new(), KeyBuilder::new())
    }

    /// Insertion rewrites produce the canonical point counts.
    #[test]
    fn test_insertion_rewrites() {
        let mut range = DynamicRange::<IntKind>::new();
        range.add_range_point(RangePoint::new(
            ComparisonOperator::Equal,
            Some(ScalarExpr::literal(Value::Int(5))),
        ));
        assert_eq!(range.point_count(), 2);

        let mut range = DynamicRange::<IntKind>::new();
        range.add_range_point(RangePoint::new(
            ComparisonOperator::LessThan,
            Some(ScalarExpr::literal(Value::Int(5))),
        ));
        assert_eq!(range.point_count(), 2);

        let mut range = DynamicRange::<IntKind>::new();
        range.add_range_point(RangePoint::new(
            ComparisonOperator::GreaterThan,
            Some(ScalarExpr::literal(Value::Int(5))),
        ));
        assert_eq!(range.point_count(), 1);
    }

    /// Equality folds to a single-key probe.
    #[test]
    fn test_equality_collapse() {
        let mut range = DynamicRange::<IntKind>::new();
        range.add_range_point(RangePoint::new(
            ComparisonOperator::Equal,
            Some(ScalarExpr::literal(Value::Int(5))),
        ));
        let (mut first, mut second) = keys();
        let scan = range
            .evaluate(&Row::new(), SortOrder::Ascending, &mut first, &mut second)
            .unwrap();
        assert_eq!(scan, RangeScan::Equality);
        assert_eq!(second.position(), 4);
    }

    /// An upper bound alone still excludes NULL rows from below.
    #[test]
    fn test_upper_bound_excludes_null() {
        let mut range = DynamicRange::<IntKind>::new();
        range.add_range_point(RangePoint::new(
            ComparisonOperator::LessThan,
            Some(ScalarExpr::literal(Value::Int(10))),
        ));
        let (mut first, mut second) = keys();
        let scan = range
            .evaluate(&Row::new(), SortOrder::Ascending, &mut first, &mut second)
            .unwrap();
        assert_eq!(
            scan,
            RangeScan::Range {
                first_op: ComparisonOperator::GreaterThan,
                second_op: ComparisonOperator::LessThan,
            }
        );
    }

    /// A NULL-valued fill range writes MIN and MAX directly.
    #[test]
    fn test_fill_range() {
        let mut range = DynamicRange::<IntKind>::new();
        let (mut first, mut second) = keys();
        range
            .create_fill_range(
                &mut first,
                &mut second,
                ComparisonOperator::GreaterThanOrEqual,
                ComparisonOperator::LessThanOrEqual,
            )
            .unwrap();
        // MIN is a lone undefined marker, MAX a full value block.
        assert_eq!(first.position(), 5);
        assert_eq!(second.position(), 13);
        assert!(first.finish()[4..] < second.finish()[4..]);
    }

    /// The residual filter is TRUE when nothing was consumed.
    #[test]
    fn test_residual_default() {
        let range = DynamicRange::<IntKind>::new();
        assert!(matches!(range.residual_expression(), BoolExpr::True));
    }
}
