//! Single-column comparison predicates with three-valued evaluation.

use std::fmt;
use std::sync::Arc;

use crate::core::Row;
use crate::range::point::AnyRangePoint;

use super::errors::ExprError;
use super::operator::ComparisonOperator;
use super::params::ParamSet;
use super::scalar::ScalarExpr;

/// A comparison between one indexed column and a scalar operand.
///
/// For `Is` and `IsNot` the operand is absent. Evaluation follows SQL
/// three-valued logic: comparing against NULL yields unknown (`None`).
#[derive(Debug, Clone)]
pub struct Comparison {
    path: String,
    op: ComparisonOperator,
    operand: Option<ScalarExpr>,
}

impl Comparison {
    /// General constructor.
    pub fn new(path: &str, op: ComparisonOperator, operand: Option<ScalarExpr>) -> Self {
        Comparison {
            path: path.to_string(),
            op,
            operand,
        }
    }

    pub fn eq(path: &str, operand: ScalarExpr) -> Self {
        Comparison::new(path, ComparisonOperator::Equal, Some(operand))
    }

    pub fn lt(path: &str, operand: ScalarExpr) -> Self {
        Comparison::new(path, ComparisonOperator::LessThan, Some(operand))
    }

    pub fn lte(path: &str, operand: ScalarExpr) -> Self {
        Comparison::new(path, ComparisonOperator::LessThanOrEqual, Some(operand))
    }

    pub fn gt(path: &str, operand: ScalarExpr) -> Self {
        Comparison::new(path, ComparisonOperator::GreaterThan, Some(operand))
    }

    pub fn gte(path: &str, operand: ScalarExpr) -> Self {
        Comparison::new(path, ComparisonOperator::GreaterThanOrEqual, Some(operand))
    }

    pub fn is_null(path: &str) -> Self {
        Comparison::new(path, ComparisonOperator::Is, None)
    }

    pub fn is_not_null(path: &str) -> Self {
        Comparison::new(path, ComparisonOperator::IsNot, None)
    }

    /// Column this predicate constrains.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Comparison operator.
    pub fn operator(&self) -> ComparisonOperator {
        self.op
    }

    /// Operand expression, absent for the NULL tests.
    pub fn operand(&self) -> Option<&ScalarExpr> {
        self.operand.as_ref()
    }

    /// Converts this predicate into an untyped range point when it
    /// constrains `path`.
    ///
    /// Returns `None` for predicates on other columns and for operands
    /// that read the row (those cannot seed an index probe).
    pub fn create_range_point(&self, path: &str) -> Option<AnyRangePoint> {
        if self.path != path {
            return None;
        }
        if let Some(operand) = &self.operand {
            if operand.is_row_dependent() {
                return None;
            }
        }
        Some(AnyRangePoint::new(
            self.op,
            self.operand.clone(),
            self.operand.as_ref().and_then(|e| e.expr_class()),
        ))
    }

    /// Three-valued evaluation against a row.
    ///
    /// `Ok(None)` is SQL unknown: the column or the operand was NULL under
    /// a value comparison.
    pub fn evaluate(&self, row: &Row) -> Result<Option<bool>, ExprError> {
        let column = row.get(&self.path);
        match self.op {
            ComparisonOperator::Is => return Ok(Some(column.is_null())),
            ComparisonOperator::IsNot => return Ok(Some(!column.is_null())),
            _ => {}
        }
        let operand = match &self.operand {
            Some(expr) => expr.evaluate(row)?,
            None => return Ok(None),
        };
        if column.is_null() || operand.is_null() {
            return Ok(None);
        }
        let ordering = match column.compare_non_null(&operand) {
            Some(ordering) => ordering,
            None => {
                let expected = operand
                    .logical_type()
                    .expr_class()
                    .unwrap_or(crate::core::ExprClass::Numeric);
                return Err(ExprError::TypeMismatch {
                    expected,
                    got: column.logical_type(),
                });
            }
        };
        let holds = match self.op {
            ComparisonOperator::Equal => ordering.is_eq(),
            ComparisonOperator::LessThan => ordering.is_lt(),
            ComparisonOperator::LessThanOrEqual => ordering.is_le(),
            ComparisonOperator::GreaterThan => ordering.is_gt(),
            ComparisonOperator::GreaterThanOrEqual => ordering.is_ge(),
            ComparisonOperator::Is | ComparisonOperator::IsNot => unreachable!(),
        };
        Ok(Some(holds))
    }

    /// Clones against a fresh parameter set.
    pub fn clone_with(&self, params: &Arc<ParamSet>) -> Self {
        Comparison {
            path: self.path.clone(),
            op: self.op,
            operand: self.operand.as_ref().map(|e| e.clone_with(params)),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Some(operand) => write!(f, "{} {} {}", self.path, self.op, operand),
            None => write!(f, "{} {} NULL", self.path, self.op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    /// Value comparisons against NULL are unknown, not false.
    #[test]
    fn test_null_is_unknown() {
        let pred = Comparison::lt("age", ScalarExpr::literal(Value::Int(10)));
        let row = Row::new();
        assert_eq!(pred.evaluate(&row).unwrap(), None);

        let row = Row::new().with("age", Value::Int(5));
        assert_eq!(pred.evaluate(&row).unwrap(), Some(true));
    }

    /// The NULL tests are two-valued.
    #[test]
    fn test_null_tests() {
        let row = Row::new().with("age", Value::Int(5));
        assert_eq!(
            Comparison::is_null("age").evaluate(&row).unwrap(),
            Some(false)
        );
        assert_eq!(
            Comparison::is_not_null("age").evaluate(&row).unwrap(),
            Some(true)
        );
        assert_eq!(
            Comparison::is_null("missing").evaluate(&row).unwrap(),
            Some(true)
        );
    }

    /// Predicates on other columns or with row-dependent operands do not
    /// become range points.
    #[test]
    fn test_range_point_extraction() {
        let pred = Comparison::eq("age", ScalarExpr::literal(Value::Int(5)));
        assert!(pred.create_range_point("age").is_some());
        assert!(pred.create_range_point("name").is_none());

        let dependent = Comparison::eq(
            "age",
            ScalarExpr::field("other", crate::core::LogicalType::Int),
        );
        assert!(dependent.create_range_point("age").is_none());
    }
}
