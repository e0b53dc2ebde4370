//! Lifecycle of a single validation run.

use std::time::Instant;

use chrono::{DateTime, Utc};

use super::checks::CheckOutcome;
use super::finding::Finding;
use super::metrics::{QualityMetrics, Tally};

/// One validation run: `start`, record check outcomes, `end`.
///
/// `end` consumes the run, so findings from one run can never leak into the
/// next; a new run always begins with [`ValidationRun::start`].
#[derive(Debug)]
pub struct ValidationRun {
    started_at: DateTime<Utc>,
    clock: Instant,
    findings: Vec<Finding>,
    tally: Tally,
}

impl ValidationRun {
    /// Begin a run with an empty finding sequence.
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            clock: Instant::now(),
            findings: Vec::new(),
            tally: Tally::default(),
        }
    }

    /// Fold one check's outcome into the run.
    pub fn record(&mut self, outcome: CheckOutcome) {
        self.tally += outcome.tally;
        self.findings.extend(outcome.findings);
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Findings recorded so far.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Finish the run and produce its metrics.
    pub fn end(self) -> QualityMetrics {
        let processing_time = self.clock.elapsed();
        let finished_at = Utc::now();

        tracing::debug!(
            findings = self.findings.len(),
            elapsed_ms = processing_time.as_millis() as u64,
            "validation run finished"
        );

        QualityMetrics::new(
            self.tally,
            self.findings,
            processing_time,
            self.started_at,
            finished_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::{CheckKind, Severity};

    #[test]
    fn test_run_lifecycle() {
        let mut run = ValidationRun::start();
        assert!(run.findings().is_empty());

        run.record(CheckOutcome {
            findings: vec![Finding::warning(CheckKind::CatalogMapping, "low")],
            tally: Tally::passed(),
        });
        run.record(CheckOutcome {
            findings: vec![Finding::error(CheckKind::Structure, "missing name")],
            tally: Tally::failed(),
        });
        assert_eq!(run.findings().len(), 2);

        let metrics = run.end();
        assert_eq!(metrics.total_items, 2);
        assert_eq!(metrics.successful, 1);
        assert_eq!(metrics.failed, 1);
        assert_eq!(metrics.items_with_warnings, 1);
        assert_eq!(metrics.findings()[1].severity, Severity::Error);
        assert!(metrics.finished_at >= metrics.started_at);
    }

    #[test]
    fn test_new_run_starts_empty() {
        let mut first = ValidationRun::start();
        first.record(CheckOutcome {
            findings: vec![Finding::error(CheckKind::Structure, "bad")],
            tally: Tally::failed(),
        });
        let _ = first.end();

        let second = ValidationRun::start();
        assert!(second.findings().is_empty());
        assert_eq!(second.tally(), Tally::default());
    }
}
