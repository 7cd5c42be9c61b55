//! Expression layer: comparison operators, scalar expressions, predicates
//! and the boolean residual tree.

pub mod errors;
pub mod logical;
pub mod operator;
pub mod params;
pub mod predicate;
pub mod scalar;

pub use errors::ExprError;
pub use logical::BoolExpr;
pub use operator::ComparisonOperator;
pub use params::ParamSet;
pub use predicate::Comparison;
pub use scalar::ScalarExpr;
