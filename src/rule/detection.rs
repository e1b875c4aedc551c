use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Detection represents the detection field in a sigma rule:
/// the condition expression plus the named selection blocks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Detection(HashMap<String, Value>);

impl Detection {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Get a field value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get the condition expression
    pub fn condition(&self) -> Option<&str> {
        self.get("condition").and_then(|v| v.as_str())
    }

    /// Extract all selection blocks (everything except the condition)
    pub fn selections(&self) -> HashMap<String, Value> {
        self.0
            .iter()
            .filter(|(k, _)| k.as_str() != "condition")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Check if a field exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl From<HashMap<String, Value>> for Detection {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}
