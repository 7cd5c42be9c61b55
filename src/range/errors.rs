//! Range construction and fold errors.

use thiserror::Error;

use crate::core::{ExprClass, LogicalType};
use crate::expr::{ComparisonOperator, ExprError};
use crate::keys::KeyError;
use crate::observability::Severity;

/// Errors raised while building and folding ranges.
///
/// Fold-stage operator errors indicate a broken insertion rewrite and are
/// internal defects, not user input problems.
#[derive(Debug, Error)]
pub enum RangeError {
    /// An operator other than the four inequalities reached the fold.
    #[error("operator {0} is not valid at fold time")]
    FoldOperator(ComparisonOperator),

    /// An operator that cannot seed a typed range point.
    #[error("operator {0} cannot be assigned to a range point")]
    PointOperator(ComparisonOperator),

    /// A point operand evaluated to a type outside the range's class.
    #[error("operand type mismatch: range expects {expected:?}, got {got:?}")]
    OperandType {
        expected: ExprClass,
        got: LogicalType,
    },

    /// Key encoding failed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Operand evaluation failed.
    #[error(transparent)]
    Expr(#[from] ExprError),
}

impl RangeError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            RangeError::FoldOperator(_) => "RANGE_FOLD_OPERATOR",
            RangeError::PointOperator(_) => "RANGE_POINT_OPERATOR",
            RangeError::OperandType { .. } => "RANGE_OPERAND_TYPE",
            RangeError::Key(err) => err.code(),
            RangeError::Expr(_) => "RANGE_EXPR",
        }
    }

    /// Any range error aborts the current scan.
    pub fn severity(&self) -> Severity {
        match self {
            RangeError::FoldOperator(_) | RangeError::PointOperator(_) => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}
