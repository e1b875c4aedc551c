use serde::{Deserialize, Serialize};

/// Logsource defines the log scope a sigma rule applies to
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Logsource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}
