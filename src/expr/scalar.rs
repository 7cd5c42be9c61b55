//! Scalar expressions: literals, bound parameters and column reads.

use std::fmt;
use std::sync::Arc;

use crate::core::{ExprClass, LogicalType, Row, Value};

use super::errors::ExprError;
use super::params::ParamSet;

/// A scalar expression producing one nullable value per row.
#[derive(Debug, Clone)]
pub enum ScalarExpr {
    /// A constant value.
    Literal(Value),
    /// A positional parameter resolved against a shared parameter set.
    Param { slot: usize, params: Arc<ParamSet> },
    /// A column read with its planned logical type.
    Field { path: String, ty: LogicalType },
}

impl ScalarExpr {
    /// Literal constructor.
    pub fn literal(value: Value) -> Self {
        ScalarExpr::Literal(value)
    }

    /// Parameter constructor.
    pub fn param(slot: usize, params: Arc<ParamSet>) -> Self {
        ScalarExpr::Param { slot, params }
    }

    /// Column-read constructor.
    pub fn field(path: &str, ty: LogicalType) -> Self {
        ScalarExpr::Field {
            path: path.to_string(),
            ty,
        }
    }

    /// Evaluates against a row, resolving parameters from the bound set.
    pub fn evaluate(&self, row: &Row) -> Result<Value, ExprError> {
        match self {
            ScalarExpr::Literal(value) => Ok(value.clone()),
            ScalarExpr::Param { slot, params } => params.get(*slot).cloned(),
            ScalarExpr::Field { path, .. } => Ok(row.get(path).clone()),
        }
    }

    /// Classification of this expression's result.
    ///
    /// `None` means NULL-valued, which is compatible with every class.
    pub fn expr_class(&self) -> Option<ExprClass> {
        match self {
            ScalarExpr::Literal(value) => value.logical_type().expr_class(),
            // Parameter slots are typed at bind time, not plan time.
            ScalarExpr::Param { slot, params } => params
                .get(*slot)
                .ok()
                .and_then(|v| v.logical_type().expr_class()),
            ScalarExpr::Field { ty, .. } => ty.expr_class(),
        }
    }

    /// True when the expression reads the row (and so must be re-evaluated
    /// per row instead of being cached).
    pub fn is_row_dependent(&self) -> bool {
        matches!(self, ScalarExpr::Field { .. })
    }

    /// Clones the expression against a fresh parameter set.
    pub fn clone_with(&self, params: &Arc<ParamSet>) -> Self {
        match self {
            ScalarExpr::Literal(value) => ScalarExpr::Literal(value.clone()),
            ScalarExpr::Param { slot, .. } => ScalarExpr::Param {
                slot: *slot,
                params: Arc::clone(params),
            },
            ScalarExpr::Field { path, ty } => ScalarExpr::Field {
                path: path.clone(),
                ty: *ty,
            },
        }
    }
}

impl fmt::Display for ScalarExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarExpr::Literal(value) => write!(f, "{value}"),
            ScalarExpr::Param { slot, .. } => write!(f, "${slot}"),
            ScalarExpr::Field { path, .. } => write!(f, "{path}"),
        }
    }
}
