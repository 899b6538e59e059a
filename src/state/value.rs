//! Structural helpers over form values
//!
//! Form values are plain `serde_json::Value` trees. These helpers give them
//! the comparison and set semantics the form layer relies on.

use serde_json::Value;
use std::fmt;

/// Primitive data type of a value, named the way option type errors report it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    String,
    Number,
    Boolean,
    /// Null, arrays and objects
    Object,
}

impl DataType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => DataType::String,
            Value::Number(_) => DataType::Number,
            Value::Bool(_) => DataType::Boolean,
            Value::Null | Value::Array(_) | Value::Object(_) => DataType::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Object => "object",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deep structural equality.
///
/// Numbers compare by numeric value, so `1` equals `1.0`. Objects compare
/// key-wise regardless of insertion order.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if x == y {
                return true;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, a)| y.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => false,
    }
}

/// Equality over optional values, where `None` only equals `None`
pub fn option_values_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => values_equal(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Whether `items` holds a value structurally equal to `needle`
pub fn contains(items: &[Value], needle: &Value) -> bool {
    items.iter().any(|item| values_equal(item, needle))
}

/// Ordered union of two arrays with duplicates removed from both sides
pub fn union(left: &[Value], right: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(left.len() + right.len());
    for item in left.iter().chain(right) {
        if !contains(&out, item) {
            out.push(item.clone());
        }
    }
    out
}

/// Copy of `items` with every occurrence of `removed` dropped
pub fn without(items: &[Value], removed: &Value) -> Vec<Value> {
    items
        .iter()
        .filter(|item| !values_equal(item, removed))
        .cloned()
        .collect()
}

/// Text shown for a scalar value inside a text control
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
