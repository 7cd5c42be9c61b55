//! Range Fold Tests
//!
//! Tests for range construction invariants:
//! - Insertion rewrites canonicalize every operator
//! - Folding keeps the tightest bound per side
//! - Equality collapse produces a single-key probe
//! - Descending scans swap endpoints and operators
//! - Clones are independent and parameter rebinding works

use std::sync::Arc;

use keyspan::core::{Row, Value, X6Decimal};
use keyspan::expr::{BoolExpr, Comparison, ComparisonOperator, ParamSet, ScalarExpr};
use keyspan::keys::KeyBuilder;
use keyspan::range::{
    build_column_range, DecimalKind, DynamicRange, IntKind, RangeConfig, RangeScan, SortOrder,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn int_literal(v: i64) -> ScalarExpr {
    ScalarExpr::literal(Value::Int(v))
}

fn evaluate(
    range: &mut DynamicRange<IntKind>,
    row: &Row,
    order: SortOrder,
) -> (RangeScan, KeyBuilder, KeyBuilder) {
    let config = RangeConfig::default();
    let mut first = config.key_builder();
    let mut second = config.key_builder();
    let scan = range.evaluate(row, order, &mut first, &mut second).unwrap();
    (scan, first, second)
}

// =============================================================================
// Fold Tests
// =============================================================================

/// x = 5 collapses to an equality probe with one key.
#[test]
fn test_equality_probe() {
    let mut conditions = vec![Comparison::eq("x", int_literal(5))];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());
    assert!(conditions.is_empty());

    let (scan, mut first, second) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);
    assert_eq!(scan, RangeScan::Equality);
    assert_eq!(second.position(), 4);
    assert_eq!(first.finish().len(), 13);
}

/// x > 5 AND x <= 10 AND x < 8 folds to (> 5, < 8).
#[test]
fn test_intersection_keeps_tightest() {
    let mut conditions = vec![
        Comparison::gt("x", int_literal(5)),
        Comparison::lte("x", int_literal(10)),
        Comparison::lt("x", int_literal(8)),
    ];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());

    let (scan, mut first, mut second) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);
    assert_eq!(
        scan,
        RangeScan::Range {
            first_op: ComparisonOperator::GreaterThan,
            second_op: ComparisonOperator::LessThan,
        }
    );
    // The endpoint keys carry 5 and 8 respectively.
    let mut five = KeyBuilder::new();
    five.append_int(Some(5)).unwrap();
    let mut eight = KeyBuilder::new();
    eight.append_int(Some(8)).unwrap();
    assert_eq!(first.finish(), five.finish());
    assert_eq!(second.finish(), eight.finish());
}

/// An upper bound alone gets a synthetic lower bound excluding NULL.
#[test]
fn test_null_exclusion() {
    let mut conditions = vec![Comparison::lt("x", int_literal(10))];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());

    let (scan, mut first, _second) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);
    assert_eq!(
        scan,
        RangeScan::Range {
            first_op: ComparisonOperator::GreaterThan,
            second_op: ComparisonOperator::LessThan,
        }
    );
    // Lower endpoint is the bare MIN sentinel, scanned exclusively.
    assert_eq!(first.finish().len(), 5);
}

/// Descending order swaps both key assignment and reported operators.
#[test]
fn test_descending_swap() {
    let mut conditions = vec![
        Comparison::gte("x", int_literal(1)),
        Comparison::lte("x", int_literal(9)),
    ];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());

    let (scan, mut first, mut second) = evaluate(&mut range, &Row::new(), SortOrder::Descending);
    assert_eq!(
        scan,
        RangeScan::Range {
            first_op: ComparisonOperator::LessThanOrEqual,
            second_op: ComparisonOperator::GreaterThanOrEqual,
        }
    );
    // First key now holds the upper value, so it compares greater.
    assert!(first.finish()[4..] > second.finish()[4..]);
}

/// IS NULL folds to an equality probe on the NULL sentinel.
#[test]
fn test_is_null_probe() {
    let mut conditions = vec![Comparison::is_null("x")];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());

    let (scan, mut first, _second) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);
    assert_eq!(scan, RangeScan::Equality);
    // The probe key is the lone undefined marker.
    assert_eq!(&first.finish()[4..], &[0u8]);
}

/// IS NOT NULL yields a lower bound strictly above NULL and an open top.
#[test]
fn test_is_not_null_range() {
    let mut conditions = vec![Comparison::is_not_null("x")];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());

    let (scan, _first, _second) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);
    assert_eq!(
        scan,
        RangeScan::Range {
            first_op: ComparisonOperator::GreaterThan,
            second_op: ComparisonOperator::LessThanOrEqual,
        }
    );
}

// =============================================================================
// Residual and Consumption Tests
// =============================================================================

/// Consumption stops at the first incompatible predicate and leaves it.
#[test]
fn test_greedy_consumption_stops() {
    let mut conditions = vec![
        Comparison::gt("x", int_literal(5)),
        Comparison::eq("y", int_literal(1)),
        Comparison::lt("x", int_literal(9)),
    ];
    let range = build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());
    assert_eq!(conditions.len(), 2);
    assert_eq!(range.point_count(), 1);
}

/// Consumed predicates land in the residual filter verbatim.
#[test]
fn test_residual_accumulates() {
    let mut conditions = vec![
        Comparison::gte("age", int_literal(18)),
        Comparison::lt("age", int_literal(65)),
    ];
    let range =
        build_column_range::<IntKind>(&mut conditions, "age", &RangeConfig::default());
    let residual = range.residual_expression();

    let inside = Row::new().with("age", Value::Int(30));
    let outside = Row::new().with("age", Value::Int(70));
    assert_eq!(residual.evaluate(&inside).unwrap(), Some(true));
    assert_eq!(residual.evaluate(&outside).unwrap(), Some(false));
    assert_eq!(residual.evaluate(&Row::new()).unwrap(), None);
}

/// An empty range reports a TRUE residual.
#[test]
fn test_empty_residual_is_true() {
    let range = DynamicRange::<IntKind>::new();
    assert!(matches!(range.residual_expression(), BoolExpr::True));
}

// =============================================================================
// Composite Prefix Tests
// =============================================================================

/// With a shared prefix already written, endpoint keys differ only in the
/// trailing bound block.
#[test]
fn test_shared_prefix_copied() {
    let mut conditions = vec![
        Comparison::gte("age", int_literal(18)),
        Comparison::lt("age", int_literal(65)),
    ];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "age", &RangeConfig::default());

    let mut first = KeyBuilder::new();
    let mut second = KeyBuilder::new();
    // Leading composite column, written to the first key only.
    first.append_int(Some(7)).unwrap();

    let row = Row::new().with("age", Value::Int(30));
    range
        .evaluate(&row, SortOrder::Ascending, &mut first, &mut second)
        .unwrap();

    let first = first.finish().to_vec();
    let second = second.finish().to_vec();
    assert_eq!(first.len(), second.len());
    assert_eq!(first[4..13], second[4..13]);
    assert_ne!(first[13..], second[13..]);
}

// =============================================================================
// Cloning and Parameter Tests
// =============================================================================

/// Rebinding a parameterized range via clone moves the probed key.
#[test]
fn test_clone_rebinds_parameters() {
    let params = Arc::new(ParamSet::new(vec![Value::Int(5)]));
    let mut conditions = vec![Comparison::eq("x", ScalarExpr::param(0, Arc::clone(&params)))];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());

    let (_, mut original_key, _) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);

    let rebound = Arc::new(ParamSet::new(vec![Value::Int(42)]));
    let mut cloned = range.clone_with(&rebound);
    let (scan, mut cloned_key, _) = evaluate(&mut cloned, &Row::new(), SortOrder::Ascending);
    assert_eq!(scan, RangeScan::Equality);
    assert_ne!(cloned_key.finish(), original_key.finish());

    // The original still probes the old value.
    let (_, mut again, _) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);
    let mut expected = KeyBuilder::new();
    expected.append_int(Some(5)).unwrap();
    assert_eq!(again.finish(), expected.finish());
}

// =============================================================================
// Numeric Domain Tests
// =============================================================================

/// A fractional bound against an integer column tightens conservatively.
#[test]
fn test_fractional_bound_on_int_column() {
    let mut conditions = vec![Comparison::gt("x", ScalarExpr::literal(Value::Float(2.5)))];
    let mut range =
        build_column_range::<IntKind>(&mut conditions, "x", &RangeConfig::default());

    let (scan, mut first, _) = evaluate(&mut range, &Row::new(), SortOrder::Ascending);
    assert_eq!(
        scan,
        RangeScan::Range {
            first_op: ComparisonOperator::GreaterThan,
            second_op: ComparisonOperator::LessThanOrEqual,
        }
    );
    let mut two = KeyBuilder::new();
    two.append_int(Some(2)).unwrap();
    assert_eq!(first.finish(), two.finish());
}

/// A literal far outside the decimal domain clamps to the domain edge.
#[test]
fn test_decimal_out_of_range_clamps() {
    let mut conditions = vec![Comparison::lt("d", ScalarExpr::literal(Value::Float(1.0e30)))];
    let mut range =
        build_column_range::<DecimalKind>(&mut conditions, "d", &RangeConfig::default());

    let config = RangeConfig::default();
    let mut first = config.key_builder();
    let mut second = config.key_builder();
    let scan = range
        .evaluate(&Row::new(), SortOrder::Ascending, &mut first, &mut second)
        .unwrap();
    assert_eq!(
        scan,
        RangeScan::Range {
            first_op: ComparisonOperator::GreaterThan,
            second_op: ComparisonOperator::LessThanOrEqual,
        }
    );
    let mut max = KeyBuilder::new();
    max.append_decimal(Some(X6Decimal::MAX)).unwrap();
    assert_eq!(second.finish(), max.finish());
}
