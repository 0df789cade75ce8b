//! Conversion of dynamically typed values into key elements.
//!
//! Host layers that receive values at runtime (JSON documents, query
//! parameters) go through [`TryFrom<&serde_json::Value>`]. Only the closed set
//! of element kinds is accepted; anything else is rejected with
//! [`CodecError::UnsupportedType`] before it reaches the encoder.
//!
//! | JSON | Element |
//! |------|---------|
//! | `null` | `Null` |
//! | `true` / `false` | `Bool` |
//! | integer number | `Integer` |
//! | string | `Text` |
//! | array | nested `Key` |
//! | non-integer number | rejected |
//! | object | rejected |
//!
//! # Example
//!
//! ```
//! use keycoder::{Element, Key};
//! use serde_json::json;
//!
//! let key = Key::try_from(&json!(["users", 42, [true, null]])).unwrap();
//! assert_eq!(key.to_string(), "(\"users\", 42, (true, null))");
//!
//! assert!(Element::try_from(&json!(1.5)).is_err());
//! assert!(Element::try_from(&json!({"a": 1})).is_err());
//! ```

use serde_json::Value;

use crate::error::CodecError;
use crate::types::{Element, Integer, Key};

impl TryFrom<&Value> for Element {
    type Error = CodecError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(Integer::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Integer(Integer::from(u)))
                } else {
                    Err(CodecError::unsupported("float", n))
                }
            }
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Array(items) => {
                items.iter().map(Self::try_from).collect::<Result<Key, _>>().map(Self::Key)
            }
            Value::Object(_) => Err(CodecError::unsupported("object", value)),
        }
    }
}

impl TryFrom<Value> for Element {
    type Error = CodecError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

/// An array becomes the key's elements; any other value becomes a key with a
/// single element.
impl TryFrom<&Value> for Key {
    type Error = CodecError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items.iter().map(Element::try_from).collect(),
            other => Element::try_from(other).map(|element| Self::new().with(element)),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = CodecError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}
