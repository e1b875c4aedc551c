//! Error types for the VHD-mount Sigma detector.

use thiserror::Error;

/// The crate-wide error type.
#[derive(Error, Debug)]
pub enum DetectError {
    /// IO operation failed (e.g. reading the log file or writing the report).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing of the log records failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing of the Sigma rule failed.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// The rule did not conform to the expected Sigma shape.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DetectError>;
