//! Equality for hovered-item descriptors.
//!
//! Charts usually rebuild their item descriptors from scratch on every
//! hit-test, so two descriptors of the same logical item are distinct values.
//! The engine compares hovered items with [`PartialEq`]; callers with their own
//! item types implement it however identity works for them. [`HoverRecord`] is
//! the ready-made option for plain key/value descriptors: object-shaped records
//! compare one level deep, field by field, and anything else compares by
//! identity.

#[cfg(test)]
#[path = "hover_test.rs"]
mod hover_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A hovered-item descriptor shaped like a plain record, e.g. `{"id": 1, "kind": "css"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoverRecord(pub Value);

impl HoverRecord {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Field lookup for object-shaped records.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for HoverRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl PartialEq for HoverRecord {
    fn eq(&self, other: &Self) -> bool {
        shallow_equal(&self.0, &other.0)
    }
}

/// Shallow structural equality.
///
/// Two objects are equal when they have the same number of keys and every key
/// of `a` maps, in `b`, to a [`strict_equal`] value. Any other pair falls back
/// to [`strict_equal`].
#[must_use]
pub fn shallow_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => objects_shallow_equal(a, b),
        _ => strict_equal(a, b),
    }
}

fn objects_shallow_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, a_val)| b.get(key).is_some_and(|b_val| strict_equal(a_val, b_val)))
}

/// Scalars compare by value (numbers numerically, so `1` equals `1.0`);
/// arrays and objects compare by identity.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn strict_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => std::ptr::eq(a, b),
        _ => false,
    }
}
