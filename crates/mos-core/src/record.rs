use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a record within one collection.
///
/// Pages key their rows either by a display string (`"SIG-45620"`) or by a
/// plain integer; both stay stable for the record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Num(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// Dynamic value type for record fields.
///
/// Untagged on the wire: an RFC 3339 string deserializes as a `Timestamp`,
/// any other string as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Text form used for substring search and status comparison.
    pub fn display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(x) => x.to_string(),
            Value::Timestamp(t) => t.to_rfc3339(),
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::display)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A row in a record list.
///
/// Each page implements this over its own struct; `field` exposes the named
/// attributes that the list's schema searches, filters and sorts on.
pub trait Record: Clone {
    /// Closed lifecycle enumeration, or `()` for pages without status actions.
    type Status: Clone + PartialEq + fmt::Debug;

    fn id(&self) -> RecordId;

    /// Value of a named field, `None` if the record has no such field.
    fn field(&self, key: &str) -> Option<Value>;

    fn status(&self) -> Option<Self::Status> {
        None
    }

    /// Returns `false` when the record does not carry a status.
    fn set_status(&mut self, _status: Self::Status) -> bool {
        false
    }

    /// Returns `false` when `key` is not an editable field.
    fn set_field(&mut self, _key: &str, _value: Value) -> bool {
        false
    }
}

/// Schemaless record, for collections deserialized from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicRecord {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl DynamicRecord {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            status: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl Record for DynamicRecord {
    type Status = String;

    fn id(&self) -> RecordId {
        self.id.clone()
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(match &self.id {
                RecordId::Num(n) => Value::Int(*n),
                RecordId::Text(s) => Value::Text(s.clone()),
            }),
            "status" => self.status.clone().map(Value::Text),
            _ => self.fields.get(key).cloned(),
        }
    }

    fn status(&self) -> Option<String> {
        self.status.clone()
    }

    fn set_status(&mut self, status: String) -> bool {
        self.status = Some(status);
        true
    }

    fn set_field(&mut self, key: &str, value: Value) -> bool {
        if key == "id" || key == "status" {
            return false;
        }
        self.fields.insert(key.to_string(), value);
        true
    }
}
