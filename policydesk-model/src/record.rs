use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Backend-assigned record key. The backend issues integers; string keys
/// are accepted so an unexpected id shape never breaks a list load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Parses a key typed by a user or read from a form control.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(trimmed.to_string()),
        }
    }

    /// Exact key equality against a stored foreign-key value.
    ///
    /// Numeric keys compare numerically whether the value arrived as a
    /// JSON number or as the digits of a form control.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (RecordId::Int(id), Value::Number(n)) if n.is_f64() => {
                n.as_f64() == Some(*id as f64)
            }
            (RecordId::Int(id), Value::Number(n)) => n.as_i64() == Some(*id),
            (RecordId::Int(id), Value::String(s)) => s.trim().parse::<i64>().ok() == Some(*id),
            (RecordId::Text(id), Value::String(s)) => id == s,
            (RecordId::Text(id), Value::Number(n)) => *id == n.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

/// One row of a backend collection: its key plus the remaining fields.
///
/// Records are owned by the backend; the session only caches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Extract a string value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The field rendered as plain text; `None` when missing or null.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
