//! keyspan - typed predicate folding and order-preserving index key encoding
//!
//! Turns runs of comparison predicates (`=`, `<`, `<=`, `>`, `>=`,
//! `IS [NOT] NULL`) on one indexed column into the tightest known
//! `[lower, upper]` bound, and encodes those bounds into sortable binary
//! index keys.

pub mod core;
pub mod explain;
pub mod expr;
pub mod keys;
pub mod observability;
pub mod range;
