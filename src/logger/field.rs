//! Typed key/value fields attached to log records.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// Value carried by a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Any JSON-representable value.
    Json(Value),
    /// A duration, rendered according to the encoder configuration.
    Duration(Duration),
}

/// A single structured field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Field holding any serializable value; unserializable values become `null`.
    pub fn any<T: Serialize>(key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        Self::new(key, value)
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Json(v)
    }
}

impl From<Duration> for FieldValue {
    fn from(v: Duration) -> Self {
        FieldValue::Duration(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Json(Value::String(v.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Json(Value::String(v))
    }
}

macro_rules! json_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(v: $t) -> Self {
                    FieldValue::Json(Value::from(v))
                }
            }
        )*
    };
}

json_from!(bool, i32, i64, u32, u64, usize, f64);
