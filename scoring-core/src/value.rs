//! Field values exchanged between callers, the dispatcher and evaluators.
//!
//! A value is either missing, a single scalar, or a list. Lists show up when
//! a multi-valued input is supplied directly, or when the dispatcher folds
//! several rows that share a grouping key into one request; in the latter
//! case each member contributes exactly one element, nulls and lists included.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered mapping from field name to value.
pub type FieldMap = IndexMap<String, Value>;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Scalar(Scalar),
    List(Vec<Value>),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::String(s) => s.trim().parse().ok(),
            Scalar::Boolean(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    // -0.0 and 0.0 must land in the same group
    fn float_bits(f: f64) -> u64 {
        if f == 0.0 { 0 } else { f.to_bits() }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => Self::float_bits(*a) == Self::float_bits(*b),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Boolean(b) => b.hash(state),
            Scalar::Integer(i) => i.hash(state),
            Scalar::Float(f) => Self::float_bits(*f).hash(state),
            Scalar::String(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of a single scalar; lists and nulls have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Scalar(s) => s.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    /// Flattens the value, nested lists included, into its scalar members.
    pub fn scalars(&self) -> Vec<&Scalar> {
        match self {
            Value::Null => Vec::new(),
            Value::Scalar(s) => vec![s],
            Value::List(items) => items.iter().flat_map(Value::scalars).collect(),
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::String(s.into()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Scalar(s) => s.hash(state),
            Value::List(items) => items.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Scalar(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Scalar(Scalar::Integer(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Boolean(b))
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Value::List(items.into_iter().map(Value::Scalar).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_null_is_a_distinct_key() {
        let mut keys = HashSet::new();
        keys.insert(Value::Null);
        keys.insert(Value::string(""));
        keys.insert(Value::Null);
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_float_keys_compare_by_value() {
        assert_eq!(Value::from(0.0), Value::from(-0.0));
        assert_ne!(Value::from(1.0), Value::from(1i64));
    }

    #[test]
    fn test_display_renders_lists_bracketed() {
        let value = Value::from(vec![
            Scalar::String("bread".to_string()),
            Scalar::Integer(2),
        ]);
        assert_eq!(value.to_string(), "[bread, 2]");
        assert_eq!(Value::Null.to_string(), "");

        let nested = Value::List(vec![Value::Null, value, Value::from(3i64)]);
        assert_eq!(nested.to_string(), "[, [bread, 2], 3]");
        assert_eq!(nested.scalars().len(), 3);
    }

    #[test]
    fn test_json_shapes() {
        let value: Value = serde_json::from_str("[1, \"a\", true]").unwrap();
        assert_eq!(
            value,
            Value::from(vec![
                Scalar::Integer(1),
                Scalar::String("a".to_string()),
                Scalar::Boolean(true)
            ])
        );
        let value: Value = serde_json::from_str("[null, [1]]").unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Null, Value::from(vec![Scalar::Integer(1)])])
        );
        let value: Value = serde_json::from_str("null").unwrap();
        assert!(value.is_null());
        let value: Value = serde_json::from_str("5.1").unwrap();
        assert_eq!(value.as_f64(), Some(5.1));
        assert_eq!(serde_json::to_string(&Value::from("x")).unwrap(), "\"x\"");
    }
}
