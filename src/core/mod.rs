//! Core value model: logical column types, runtime values, rows.

pub mod decimal;
pub mod row;
pub mod value;

pub use decimal::X6Decimal;
pub use row::Row;
pub use value::{ExprClass, LogicalType, Numeric, ObjectRef, Value};
