//! Console and file reporting
//!
//! The same per-record lines and summary go to both sinks; the report file
//! additionally carries a header with the rule title, run timestamp, and
//! input file name, and embeds the run timestamp in its own name so
//! successive runs never collide.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::batch::{BatchSummary, RecordOutcome};
use crate::error::Result;

const SEPARATOR_WIDTH: usize = 80;

/// Label for a record that satisfied the rule
pub const STATUS_DETECTED: &str = "DETECTED (matches rule)";
/// Label for a record that did not
pub const STATUS_NOT_DETECTED: &str = "Not detected";

/// Report file name with the run timestamp embedded
pub fn report_file_name(started: &DateTime<Local>) -> String {
    format!(
        "vhd_mount_detection_results_{}.txt",
        started.format("%Y%m%d_%H%M%S")
    )
}

/// Two-line diagnostic block for one record
pub fn render_record(record: &RecordOutcome) -> String {
    let status = if record.outcome.matched {
        STATUS_DETECTED
    } else {
        STATUS_NOT_DETECTED
    };

    let detail = &record.outcome.detail;
    let event_id = detail
        .event_id
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "null".to_string());

    format!(
        "Log {}: {}\n  Details: EventID={}, VhdFileName={}",
        record.index, status, event_id, detail.vhd_filename
    )
}

/// The complete result set of one detection run
#[derive(Debug, Clone)]
pub struct DetectionReport {
    rule_title: String,
    log_file: String,
    started: DateTime<Local>,
    blocks: Vec<String>,
    summary: BatchSummary,
}

impl DetectionReport {
    pub fn new(
        rule_title: impl Into<String>,
        log_file: impl Into<String>,
        started: DateTime<Local>,
        outcomes: &[RecordOutcome],
        summary: BatchSummary,
    ) -> Self {
        Self {
            rule_title: rule_title.into(),
            log_file: log_file.into(),
            started,
            blocks: outcomes.iter().map(render_record).collect(),
            summary,
        }
    }

    /// The `SUMMARY: <matches>/<total> logs matched the rule (<pct>%)` line
    pub fn summary_line(&self) -> String {
        format!(
            "SUMMARY: {}/{} logs matched the rule ({:.1}%)",
            self.summary.matches,
            self.summary.total,
            self.summary.match_percentage()
        )
    }

    /// Print the run banner, per-record blocks, and summary to stdout
    pub fn print_console(&self) {
        println!();
        println!("Testing logs against rule '{}'...", self.rule_title);
        println!("{}", "-".repeat(SEPARATOR_WIDTH));

        for block in &self.blocks {
            println!("{}", block);
        }

        println!();
        println!("{}", "=".repeat(SEPARATOR_WIDTH));
        println!("{}", self.summary_line());
        println!("{}", "=".repeat(SEPARATOR_WIDTH));
    }

    /// The report file body: header, per-record blocks, summary
    pub fn render(&self) -> String {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        let mut out = String::new();

        out.push_str(&format!(
            "Test Results for Sigma Rule: {}\n",
            self.rule_title
        ));
        out.push_str(&format!(
            "Date/Time: {}\n",
            self.started.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("Log File: {}\n", self.log_file));
        out.push_str(&separator);
        out.push_str("\n\n");

        for block in &self.blocks {
            out.push_str(block);
            out.push_str("\n\n");
        }

        out.push_str(&separator);
        out.push('\n');
        out.push_str(&self.summary_line());
        out.push('\n');

        out
    }

    /// Write the rendered report into `dir`, returning the file path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(report_file_name(&self.started));
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), "report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::evaluate_batch;
    use crate::event::LogRecord;
    use crate::matcher::VhdMountMatcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn report_for(records: Vec<LogRecord>) -> DetectionReport {
        let (outcomes, summary) = evaluate_batch(&VhdMountMatcher::new(), &records);
        DetectionReport::new(
            "Detect VHD/VHDX Mount (Potential CVE-2025-24985 Exploit)",
            "combined_sample_logs.json",
            Local::now(),
            &outcomes,
            summary,
        )
    }

    #[test]
    fn test_record_block_format() {
        let (outcomes, _) = evaluate_batch(
            &VhdMountMatcher::new(),
            &[LogRecord::new(json!({
                "EventID": 12,
                "EventData": {"VhdFileName": "C:\\Users\\test\\disk.vhdx"}
            }))],
        );

        assert_eq!(
            render_record(&outcomes[0]),
            "Log 1: DETECTED (matches rule)\n  Details: EventID=12, VhdFileName=C:\\Users\\test\\disk.vhdx"
        );
    }

    #[test]
    fn test_record_block_missing_fields() {
        let (outcomes, _) = evaluate_batch(&VhdMountMatcher::new(), &[LogRecord::new(json!({}))]);

        assert_eq!(
            render_record(&outcomes[0]),
            "Log 1: Not detected\n  Details: EventID=null, VhdFileName="
        );
    }

    #[test]
    fn test_summary_line() {
        let report = report_for(vec![
            LogRecord::new(json!({
                "EventID": 12,
                "EventData": {"VhdFileName": "disk.vhdx"}
            })),
            LogRecord::new(json!({
                "EventID": 4624,
                "EventData": {"VhdFileName": "disk.vhdx"}
            })),
        ]);

        assert_eq!(report.summary_line(), "SUMMARY: 1/2 logs matched the rule (50.0%)");
    }

    #[test]
    fn test_summary_line_empty_batch() {
        let report = report_for(vec![]);
        assert_eq!(report.summary_line(), "SUMMARY: 0/0 logs matched the rule (0.0%)");
    }

    #[test]
    fn test_render_layout() {
        let report = report_for(vec![LogRecord::new(json!({
            "EventID": 1,
            "EventData": {"VhdFileName": "disk.vhd"}
        }))]);

        let body = report.render();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(
            lines[0],
            "Test Results for Sigma Rule: Detect VHD/VHDX Mount (Potential CVE-2025-24985 Exploit)"
        );
        assert!(lines[1].starts_with("Date/Time: "));
        assert_eq!(lines[2], "Log File: combined_sample_logs.json");
        assert_eq!(lines[3], "=".repeat(80));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Log 1: DETECTED (matches rule)");
        assert!(body.ends_with("SUMMARY: 1/1 logs matched the rule (100.0%)\n"));
    }

    #[test]
    fn test_report_file_name_embeds_timestamp() {
        let started = Local::now();
        let name = report_file_name(&started);
        assert!(name.starts_with("vhd_mount_detection_results_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "vhd_mount_detection_results_".len() + 15 + 4);
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report = report_for(vec![LogRecord::new(json!({"EventID": 1}))]);

        let path = report.write_to_dir(dir.path()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.render());
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let report = report_for(vec![]);
        let err = report.write_to_dir(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, crate::error::DetectError::Io(_)));
    }
}
