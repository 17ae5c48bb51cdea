//! Datum: the dynamic value flowing through widget pipelines
//!
//! Getters produce a `Datum`, extractors append `Datum`s to
//! [`RuntimeData::extracted`], and compound widgets nest whole
//! [`RuntimeData`] records inside one.
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::runtime::RuntimeData;

/// Raw request data handed to a widget by the caller.
pub type Request = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Datum {
    /// Nothing extracted yet. Falsy, displays as the empty string.
    #[default]
    Unset,
    /// A plain JSON value.
    Value(Value),
    /// A nested runtime record, produced by compound extraction.
    Record(Box<RuntimeData>),
    /// Named entries, kept in insertion order.
    Map(IndexMap<String, Datum>),
    /// Ordered entries.
    List(Vec<Datum>),
}

impl Datum {
    /// JSON `null`, the value of a widget composed without one.
    pub fn null() -> Self {
        Datum::Value(Value::Null)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Datum::Unset)
    }

    pub fn as_record(&self) -> Option<&RuntimeData> {
        match self {
            Datum::Record(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Looks up a named entry in a `Map` or a JSON object.
    pub fn get(&self, key: &str) -> Option<Datum> {
        match self {
            Datum::Map(map) => map.get(key).cloned(),
            Datum::Value(Value::Object(obj)) => obj.get(key).cloned().map(Datum::Value),
            _ => None,
        }
    }

    /// Truthiness used by `RuntimeData::has_extracted`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Datum::Unset => false,
            Datum::Value(value) => json_truthy(value),
            Datum::Record(_) => true,
            Datum::Map(map) => !map.is_empty(),
            Datum::List(list) => !list.is_empty(),
        }
    }
}

pub(crate) fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Unset | Datum::Value(Value::Null) => Ok(()),
            Datum::Value(Value::String(s)) => f.write_str(s),
            Datum::Value(value) => write!(f, "{}", value),
            other => {
                let text = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        Datum::Value(value)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Datum::Value(Value::String(value))
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Datum::Value(Value::from(value))
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::Value(Value::from(value))
    }
}

impl From<bool> for Datum {
    fn from(value: bool) -> Self {
        Datum::Value(Value::Bool(value))
    }
}

impl From<RuntimeData> for Datum {
    fn from(data: RuntimeData) -> Self {
        Datum::Record(Box::new(data))
    }
}

impl From<IndexMap<String, Datum>> for Datum {
    fn from(map: IndexMap<String, Datum>) -> Self {
        Datum::Map(map)
    }
}

impl From<Vec<Datum>> for Datum {
    fn from(list: Vec<Datum>) -> Self {
        Datum::List(list)
    }
}
