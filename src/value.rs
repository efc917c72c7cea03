//! Runtime values checked against declared return types.
//!
//! [`PhpValue`] models the dynamic values a PHP method can return, and
//! [`PhpValue::type_name`] reproduces `strtolower(gettype($value))`, the
//! naming scheme the conformance check compares against.
//!
//! Values can be deserialised from JSON.  JSON objects become associative
//! arrays, except for objects of the form `{"__class": "Name"}`, which
//! stand for an instance of `Name`.

use serde::Deserialize;
use serde_json::Value;

/// JSON key marking an object as a class instance.
pub const CLASS_KEY: &str = "__class";

/// A PHP array key.  PHP normalises decimal integer strings to integers.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

impl From<&str> for ArrayKey {
    fn from(key: &str) -> Self {
        let canonical = !key.is_empty()
            && !(key.starts_with('0') && key.len() > 1)
            && !key.starts_with("-0");
        match key.parse::<i64>() {
            Ok(n) if canonical && !key.starts_with('+') => ArrayKey::Int(n),
            _ => ArrayKey::String(key.to_string()),
        }
    }
}

/// An instance of a class, identified by its class name.
#[derive(Debug, Clone, PartialEq)]
pub struct PhpObject {
    pub class: String,
}

impl PhpObject {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<(ArrayKey, PhpValue)>),
    Object(PhpObject),
    Resource { closed: bool },
}

impl PhpValue {
    /// Shorthand for an instance of `class`.
    pub fn object(class: impl Into<String>) -> Self {
        PhpValue::Object(PhpObject::new(class))
    }

    /// A list (`[a, b, c]`) with keys 0, 1, 2, ...
    pub fn list(items: impl IntoIterator<Item = PhpValue>) -> Self {
        PhpValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ArrayKey::Int(i as i64), v))
                .collect(),
        )
    }

    /// The lower-cased `gettype()` name of the value.
    pub fn type_name(&self) -> &'static str {
        match self {
            PhpValue::Null => "null",
            PhpValue::Bool(_) => "boolean",
            PhpValue::Int(_) => "integer",
            PhpValue::Float(_) => "double",
            PhpValue::String(_) => "string",
            PhpValue::Array(_) => "array",
            PhpValue::Object(_) => "object",
            PhpValue::Resource { closed: false } => "resource",
            PhpValue::Resource { closed: true } => "resource (closed)",
        }
    }

    pub fn as_object(&self) -> Option<&PhpObject> {
        match self {
            PhpValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<Value> for PhpValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PhpValue::Null,
            Value::Bool(b) => PhpValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PhpValue::Int(i),
                // Out-of-range integers overflow to float, as in PHP.
                None => PhpValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => PhpValue::String(s),
            Value::Array(items) => PhpValue::list(items.into_iter().map(PhpValue::from)),
            Value::Object(map) => {
                if map.len() == 1
                    && let Some(Value::String(class)) = map.get(CLASS_KEY)
                {
                    return PhpValue::object(class.clone());
                }
                PhpValue::Array(
                    map.into_iter()
                        .map(|(k, v)| (ArrayKey::from(k.as_str()), PhpValue::from(v)))
                        .collect(),
                )
            }
        }
    }
}
