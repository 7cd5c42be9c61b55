//! Read-only rendering of range state, for diagnostics and plan output.

use crate::range::{DynamicRange, RangeKind};

/// Renders a range's canonical point list and residual filter as an
/// indented, deterministic text block.
pub fn describe_range<K: RangeKind>(range: &DynamicRange<K>, column: &str) -> String {
    let mut out = String::new();
    out.push_str("range on ");
    out.push_str(column);
    out.push('\n');
    for point in range.points() {
        out.push_str("  point ");
        out.push_str(point.operator().symbol());
        match point.expression() {
            Some(expr) => {
                out.push(' ');
                out.push_str(&expr.to_string());
            }
            None => out.push_str(" MIN"),
        }
        out.push('\n');
    }
    out.push_str("  residual ");
    out.push_str(&range.residual_expression().to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::expr::Comparison;
    use crate::expr::ScalarExpr;
    use crate::range::{build_column_range, IntKind, RangeConfig};

    /// Output lists canonical points in insertion order plus the residual.
    #[test]
    fn test_describe_range() {
        let mut conditions = vec![
            Comparison::gt("age", ScalarExpr::literal(Value::Int(18))),
            Comparison::lt("age", ScalarExpr::literal(Value::Int(65))),
        ];
        let range =
            build_column_range::<IntKind>(&mut conditions, "age", &RangeConfig::default());
        let text = describe_range(&range, "age");
        assert_eq!(
            text,
            "range on age\n  point > 18\n  point < 65\n  point > MIN\n  residual (age > 18 AND age < 65)\n"
        );
    }
}
