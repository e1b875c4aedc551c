//! Sequential batch driver
//!
//! Applies a [`RuleMatcher`] to every record of a loaded batch, in input
//! order, accumulating the match count. Single-threaded by construction:
//! the workload is a bounded in-memory batch and the matcher is pure.

use crate::event::LogRecord;
use crate::matcher::{MatchOutcome, RuleMatcher};

/// One record's position and evaluation result. Indices are 1-based to line
/// up with the report output.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub index: usize,
    pub outcome: MatchOutcome,
}

/// Aggregate counts over one batch
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub matches: usize,
}

impl BatchSummary {
    /// Percentage of records matched; 0.0 for an empty batch
    pub fn match_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.matches as f64 / self.total as f64) * 100.0
        }
    }
}

/// Evaluate every record in sequence and accumulate match counts
pub fn evaluate_batch(
    matcher: &dyn RuleMatcher,
    records: &[LogRecord],
) -> (Vec<RecordOutcome>, BatchSummary) {
    let mut outcomes = Vec::with_capacity(records.len());
    let mut matches = 0;

    for (i, record) in records.iter().enumerate() {
        let outcome = matcher.evaluate(record);
        if outcome.matched {
            matches += 1;
        }
        outcomes.push(RecordOutcome {
            index: i + 1,
            outcome,
        });
    }

    let summary = BatchSummary {
        total: records.len(),
        matches,
    };

    tracing::info!(
        total = summary.total,
        matches = summary.matches,
        "batch evaluated"
    );

    (outcomes, summary)
}
