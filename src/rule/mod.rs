use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

pub mod detection;
pub mod logsource;

pub use detection::Detection;
pub use logsource::Logsource;

/// YAML source of the one rule this tool validates, shipped with the binary
/// so a run needs no rule directory.
const VHD_MOUNT_RULE_YAML: &str = include_str!("../../rules/vhd_mount_detection.yml");

/// Rule defines raw rule conforming to sigma rule specification
/// https://github.com/Neo23x0/sigma/wiki/Specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub falsepositives: Vec<String>,

    #[serde(default)]
    pub fields: Vec<String>,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub references: Vec<String>,

    #[serde(default)]
    pub logsource: Logsource,

    pub detection: Detection,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl Rule {
    /// The embedded VHD/VHDX mount detection rule
    pub fn vhd_mount() -> Result<Rule> {
        let rule = rule_from_yaml(VHD_MOUNT_RULE_YAML.as_bytes())?;
        rule.validate()?;
        Ok(rule)
    }

    /// Minimal shape check: a usable rule carries an id, a title, and a
    /// detection condition.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(DetectError::InvalidRule("empty rule id".to_string()));
        }
        if self.title.is_empty() {
            return Err(DetectError::InvalidRule("empty rule title".to_string()));
        }
        if self.detection.condition().is_none() {
            return Err(DetectError::InvalidRule(format!(
                "rule {} has no detection condition",
                self.id
            )));
        }
        Ok(())
    }
}

/// Parse a Rule from YAML data
pub fn rule_from_yaml(data: &[u8]) -> Result<Rule> {
    Ok(serde_yaml::from_slice::<Rule>(data)?)
}
