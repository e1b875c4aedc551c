//! The rule matcher
//!
//! [`VhdMountMatcher`] implements the detection logic of the rule
//! "Detect VHD/VHDX Mount (Potential CVE-2025-24985 Exploit)": EventID 1 or
//! 12 in the Microsoft-Windows-VHDMP-Operational channel, combined with a
//! mounted file name ending in `.vhd` or `.vhdx`.
//!
//! Matching is a pure function of a single record. Missing or malformed
//! fields degrade to neutral values; evaluation never fails.

use crate::event::{LogRecord, Selector, Value};

/// EventIDs that indicate a VHD surface/mount operation
pub const MOUNT_EVENT_IDS: [i64; 2] = [1, 12];

/// Accepted virtual disk file suffixes, compared case-insensitively
pub const VHD_SUFFIXES: [&str; 2] = [".vhd", ".vhdx"];

/// Why a record did or did not match, with the raw field values as read:
/// the EventID is reported unnormalized and the file name pre-lowercasing.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDetail {
    pub event_id_match: bool,
    pub vhd_extension_match: bool,
    pub event_id: Option<Value>,
    pub vhd_filename: String,
}

/// Outcome of evaluating one record against the rule
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matched: bool,
    pub detail: MatchDetail,
}

/// Trait for evaluating a single record against a detection rule
pub trait RuleMatcher {
    /// Evaluate one record; must never fail
    fn evaluate(&self, record: &LogRecord) -> MatchOutcome;
}

/// Stateless matcher for the VHD/VHDX mount rule
#[derive(Debug, Clone, Copy, Default)]
pub struct VhdMountMatcher;

impl VhdMountMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl RuleMatcher for VhdMountMatcher {
    fn evaluate(&self, record: &LogRecord) -> MatchOutcome {
        let (event_id, _) = record.select("EventID");
        let (filename_value, _) = record.select("EventData.VhdFileName");

        // Absent or non-string file names degrade to the empty string
        let vhd_filename = filename_value
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let event_id_match = is_mount_event_id(event_id.as_ref());
        let vhd_extension_match = has_vhd_suffix(&vhd_filename);
        let matched = event_id_match && vhd_extension_match;

        tracing::trace!(
            record = record.id(),
            matched,
            event_id_match,
            vhd_extension_match,
            "evaluated record"
        );

        MatchOutcome {
            matched,
            detail: MatchDetail {
                event_id_match,
                vhd_extension_match,
                event_id,
                vhd_filename,
            },
        }
    }
}

/// EventID comparison is type-tolerant: the numeric forms 1 and 12 and their
/// string forms "1" and "12" are equivalent. Integral floats count as their
/// numeric value; anything else (absent, other strings, other types) does not
/// satisfy the condition.
fn is_mount_event_id(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Integer(n)) => MOUNT_EVENT_IDS.contains(n),
        Some(Value::Float(f)) => MOUNT_EVENT_IDS.iter().any(|&id| *f == id as f64),
        Some(Value::String(s)) => MOUNT_EVENT_IDS.iter().any(|id| id.to_string() == *s),
        _ => false,
    }
}

/// Suffix check on the lowercased name: an OR of plain `ends_with` tests,
/// not extension parsing. `notavhd.vhd` matches; `archive.vhd.bak` does not.
fn has_vhd_suffix(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    VHD_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}
