//! Log records and field selection
//!
//! A [`LogRecord`] wraps one JSON event-log entry. Field access goes through
//! the [`Selector`] trait with dot-separated paths (`EventData.VhdFileName`),
//! returning `(None, false)` for anything absent rather than failing.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Trait for records that support key-value selection
pub trait Selector {
    /// Select a value by key from the record
    /// Returns (value, found) where found indicates if the key exists
    fn select(&self, key: &str) -> (Option<Value>, bool);
}

/// Value type that can be returned from selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
    Null,
}

impl Value {
    /// Convert value to string if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert value to integer if possible
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert value to float if possible
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Convert value to bool if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Array(arr) => {
                Value::Array(arr.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

/// Raw-value rendering for diagnostic lines: scalars print bare, null prints
/// as `null`, compound values fall back to their JSON form.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            other => match serde_json::to_string(other) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "?"),
            },
        }
    }
}

/// One event-log entry as loaded from the input batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    data: serde_json::Value,
    id: String,
}

impl LogRecord {
    /// Wrap a JSON value as a record. Never fails; non-object values simply
    /// have no selectable fields.
    pub fn new(data: serde_json::Value) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        Self { data, id }
    }

    /// Record ID used for tracing
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The underlying JSON value
    pub fn raw(&self) -> &serde_json::Value {
        &self.data
    }
}

impl Selector for LogRecord {
    fn select(&self, key: &str) -> (Option<Value>, bool) {
        // Navigate nested keys using dot notation
        let mut current = &self.data;

        for part in key.split('.') {
            match current.get(part) {
                Some(value) => current = value,
                None => return (None, false),
            }
        }

        (Some(Value::from_json(current)), true)
    }
}

/// Load a batch of log records from a file holding a JSON array.
///
/// A missing file or malformed JSON aborts the run before any matching; a
/// well-formed array always loads fully, whatever the individual records
/// look like.
pub fn load_records(path: &Path) -> Result<Vec<LogRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let entries: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

    tracing::debug!(count = entries.len(), path = %path.display(), "loaded log batch");

    Ok(entries.into_iter().map(LogRecord::new).collect())
}
