//! Bound parameter sets shared by expression clones.

use crate::core::Value;

use super::errors::ExprError;

/// An immutable, positionally indexed set of bound parameter values.
///
/// Cloned expression trees share one set through an `Arc`, so rebinding for
/// a new execution means building a fresh set and cloning the tree against
/// it rather than mutating shared state.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    values: Vec<Value>,
}

impl ParamSet {
    /// Builds a parameter set from positional values.
    pub fn new(values: Vec<Value>) -> Self {
        ParamSet { values }
    }

    /// Number of bound slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no parameters are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads a slot, failing on out-of-range references.
    pub fn get(&self, slot: usize) -> Result<&Value, ExprError> {
        self.values.get(slot).ok_or(ExprError::UnboundParameter(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Out-of-range slots fail instead of reading garbage.
    #[test]
    fn test_unbound_slot_fails() {
        let params = ParamSet::new(vec![Value::Int(1)]);
        assert!(params.get(0).is_ok());
        assert!(matches!(
            params.get(1),
            Err(ExprError::UnboundParameter(1))
        ));
    }
}
