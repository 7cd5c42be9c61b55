//! Range points: a comparison operator plus an optional operand
//! expression, evaluated per row into a cached fold candidate.

use std::sync::Arc;

use crate::core::{ExprClass, Row};
use crate::expr::{ComparisonOperator, ParamSet, ScalarExpr};

use super::errors::RangeError;
use super::kind::RangeKind;
use super::value::RangeValue;

/// An untyped range point extracted from a predicate, before a typed
/// range claims it.
#[derive(Debug, Clone)]
pub struct AnyRangePoint {
    op: ComparisonOperator,
    expr: Option<ScalarExpr>,
    class: Option<ExprClass>,
}

impl AnyRangePoint {
    /// Wraps an extracted operator, operand and operand class.
    pub fn new(
        op: ComparisonOperator,
        expr: Option<ScalarExpr>,
        class: Option<ExprClass>,
    ) -> Self {
        AnyRangePoint { op, expr, class }
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.op
    }

    pub fn expression(&self) -> Option<&ScalarExpr> {
        self.expr.as_ref()
    }

    /// Operand class; `None` means NULL-valued, compatible with any kind.
    pub fn class(&self) -> Option<ExprClass> {
        self.class
    }
}

/// A typed range point with its single mutable cached value.
///
/// The cache is overwritten on every evaluation; callers must not retain
/// the returned reference across evaluations, and each scan thread owns
/// its own points (or clones them).
pub struct RangePoint<K: RangeKind> {
    op: ComparisonOperator,
    expr: Option<ScalarExpr>,
    cached: RangeValue<K>,
}

impl<K: RangeKind> RangePoint<K> {
    /// Point with an operand expression.
    pub fn new(op: ComparisonOperator, expr: Option<ScalarExpr>) -> Self {
        RangePoint {
            op,
            expr,
            cached: RangeValue::new(),
        }
    }

    /// Degenerate point with no expression; evaluates to the MIN sentinel
    /// under `op`.
    pub fn without_expr(op: ComparisonOperator) -> Self {
        RangePoint::new(op, None)
    }

    /// The synthetic lower point excluding NULL rows: strictly greater
    /// than the MIN sentinel.
    pub fn null_exclusion() -> Self {
        RangePoint::without_expr(ComparisonOperator::GreaterThan)
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.op
    }

    pub fn expression(&self) -> Option<&ScalarExpr> {
        self.expr.as_ref()
    }

    /// Splits an equality point into its `>=` and `<=` halves on the same
    /// operand.
    pub fn split_equality(self) -> (RangePoint<K>, RangePoint<K>) {
        let lower = RangePoint::new(ComparisonOperator::GreaterThanOrEqual, self.expr.clone());
        let upper = RangePoint::new(ComparisonOperator::LessThanOrEqual, self.expr);
        (lower, upper)
    }

    /// Evaluates the operand against a row into the cached value.
    pub fn evaluate(&mut self, row: &Row) -> Result<&RangeValue<K>, RangeError> {
        match &self.expr {
            None => self.cached.reset_to_min(self.op),
            Some(expr) => {
                let operand = expr.evaluate(row)?;
                K::assign(self.op, &operand, &mut self.cached)?;
            }
        }
        Ok(&self.cached)
    }

    /// Clones against a fresh parameter set, with a fresh cache.
    pub fn clone_with(&self, params: &Arc<ParamSet>) -> Self {
        RangePoint {
            op: self.op,
            expr: self.expr.as_ref().map(|e| e.clone_with(params)),
            cached: RangeValue::new(),
        }
    }
}

impl<K: RangeKind> std::fmt::Debug for RangePoint<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangePoint")
            .field("op", &self.op)
            .field("expr", &self.expr)
            .finish()
    }
}
