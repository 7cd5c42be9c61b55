//! Boolean residual tree: the predicates a range could not absorb.

use std::fmt;
use std::sync::Arc;

use crate::core::Row;

use super::errors::ExprError;
use super::params::ParamSet;
use super::predicate::Comparison;

/// A conjunction tree of comparison predicates.
///
/// `True` is the identity: a range with nothing left over carries a `True`
/// residual so callers never special-case its absence.
#[derive(Debug, Clone)]
pub enum BoolExpr {
    True,
    Comparison(Box<Comparison>),
    And(Box<BoolExpr>, Box<BoolExpr>),
}

impl BoolExpr {
    /// Wraps a single predicate.
    pub fn comparison(pred: Comparison) -> Self {
        BoolExpr::Comparison(Box::new(pred))
    }

    /// Conjunction with `True` elimination.
    pub fn and(self, other: BoolExpr) -> Self {
        match (self, other) {
            (BoolExpr::True, rhs) => rhs,
            (lhs, BoolExpr::True) => lhs,
            (lhs, rhs) => BoolExpr::And(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// Three-valued evaluation. Unknown AND false is false; unknown AND
    /// true stays unknown.
    pub fn evaluate(&self, row: &Row) -> Result<Option<bool>, ExprError> {
        match self {
            BoolExpr::True => Ok(Some(true)),
            BoolExpr::Comparison(pred) => pred.evaluate(row),
            BoolExpr::And(lhs, rhs) => {
                let left = lhs.evaluate(row)?;
                if left == Some(false) {
                    return Ok(Some(false));
                }
                let right = rhs.evaluate(row)?;
                match (left, right) {
                    (_, Some(false)) => Ok(Some(false)),
                    (Some(true), Some(true)) => Ok(Some(true)),
                    _ => Ok(None),
                }
            }
        }
    }

    /// Clones the tree against a fresh parameter set.
    pub fn clone_with(&self, params: &Arc<ParamSet>) -> Self {
        match self {
            BoolExpr::True => BoolExpr::True,
            BoolExpr::Comparison(pred) => {
                BoolExpr::Comparison(Box::new(pred.clone_with(params)))
            }
            BoolExpr::And(lhs, rhs) => BoolExpr::And(
                Box::new(lhs.clone_with(params)),
                Box::new(rhs.clone_with(params)),
            ),
        }
    }
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolExpr::True => write!(f, "TRUE"),
            BoolExpr::Comparison(pred) => write!(f, "{pred}"),
            BoolExpr::And(lhs, rhs) => write!(f, "({lhs} AND {rhs})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::expr::scalar::ScalarExpr;

    /// Unknown propagates through AND unless a branch is false.
    #[test]
    fn test_three_valued_and() {
        let row = Row::new().with("a", Value::Int(1));
        let true_pred =
            BoolExpr::comparison(Comparison::eq("a", ScalarExpr::literal(Value::Int(1))));
        let false_pred =
            BoolExpr::comparison(Comparison::eq("a", ScalarExpr::literal(Value::Int(2))));
        let unknown_pred =
            BoolExpr::comparison(Comparison::eq("b", ScalarExpr::literal(Value::Int(1))));

        assert_eq!(
            true_pred.clone().and(unknown_pred.clone()).evaluate(&row).unwrap(),
            None
        );
        assert_eq!(
            unknown_pred.and(false_pred).evaluate(&row).unwrap(),
            Some(false)
        );
        assert_eq!(
            true_pred.clone().and(true_pred).evaluate(&row).unwrap(),
            Some(true)
        );
    }

    /// TRUE is the conjunction identity.
    #[test]
    fn test_true_identity() {
        let pred = BoolExpr::comparison(Comparison::is_null("x"));
        let combined = BoolExpr::True.and(pred);
        assert!(matches!(combined, BoolExpr::Comparison(_)));
        assert!(matches!(combined.and(BoolExpr::True), BoolExpr::Comparison(_)));
    }
}
