//! Expression evaluation errors.

use thiserror::Error;

use crate::core::{ExprClass, LogicalType};

/// Errors raised while evaluating scalar expressions and predicates.
#[derive(Debug, Error)]
pub enum ExprError {
    /// A parameter slot was referenced but never bound.
    #[error("parameter slot {0} is not bound")]
    UnboundParameter(usize),

    /// An operand's runtime type does not fit the expression class it was
    /// planned under.
    #[error("type mismatch: expected {expected:?} operand, got {got:?}")]
    TypeMismatch {
        expected: ExprClass,
        got: LogicalType,
    },
}

impl ExprError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::UnboundParameter(_) => "EXPR_UNBOUND_PARAMETER",
            ExprError::TypeMismatch { .. } => "EXPR_TYPE_MISMATCH",
        }
    }
}
