//! Sigma rule tester for VHD/VHDX mount detection
//!
//! This library validates batches of Windows event-log records against the
//! Sigma rule "Detect VHD/VHDX Mount (Potential CVE-2025-24985 Exploit)":
//! a pure per-record matcher, a sequential batch driver, and console/file
//! reporting of per-record and aggregate results.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use batch::{evaluate_batch, BatchSummary, RecordOutcome};
pub use error::{DetectError, Result};
pub use event::{load_records, LogRecord, Selector, Value};
pub use matcher::{MatchDetail, MatchOutcome, RuleMatcher, VhdMountMatcher};
pub use report::{report_file_name, DetectionReport};
pub use rule::Rule;

/// Sequential batch driver
pub mod batch;

/// Error types
pub mod error;

/// Log records and field selection
pub mod event;

/// The rule matcher
pub mod matcher;

/// Console and file reporting
pub mod report;

/// Rule definitions and YAML parsing
pub mod rule;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise verbosity maps 0/1/2+ to
/// info/debug/trace. Logs go to stderr so report output on stdout stays
/// clean.
pub fn init_tracing(verbose: u8, json_logs: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
