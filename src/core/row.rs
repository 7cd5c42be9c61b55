//! Row abstraction evaluated against predicates and range points.

use std::collections::HashMap;

use super::value::Value;

/// A single evaluation row: a map from column path to value.
///
/// Missing columns read as NULL, matching SQL semantics for absent data.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, Value>,
}

static NULL: Value = Value::Null;

impl Row {
    /// Creates an empty row (every column reads as NULL).
    pub fn new() -> Self {
        Row::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, path: &str, value: Value) -> Self {
        self.fields.insert(path.to_string(), value);
        self
    }

    /// Sets a column value in place.
    pub fn insert(&mut self, path: &str, value: Value) {
        self.fields.insert(path.to_string(), value);
    }

    /// Reads a column; absent columns are NULL.
    pub fn get(&self, path: &str) -> &Value {
        self.fields.get(path).unwrap_or(&NULL)
    }

    /// Builds a row from a flat JSON object, skipping non-scalar members.
    pub fn from_json(object: &serde_json::Value) -> Self {
        let mut row = Row::new();
        if let Some(map) = object.as_object() {
            for (key, raw) in map {
                if let Some(value) = Value::from_json(raw) {
                    row.insert(key, value);
                }
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Absent columns read as NULL.
    #[test]
    fn test_missing_column_is_null() {
        let row = Row::new().with("age", Value::Int(30));
        assert_eq!(row.get("age"), &Value::Int(30));
        assert!(row.get("name").is_null());
    }

    /// JSON objects map member-wise, dropping composites.
    #[test]
    fn test_from_json() {
        let row = Row::from_json(&serde_json::json!({
            "name": "alice",
            "age": 30,
            "tags": ["a", "b"]
        }));
        assert_eq!(row.get("name"), &Value::Str("alice".to_string()));
        assert_eq!(row.get("age"), &Value::Int(30));
        assert!(row.get("tags").is_null());
    }
}
