//! Aggregate counters for one validation run.

use std::ops::AddAssign;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::finding::{Finding, Severity};

/// Item counts contributed by a single check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl Tally {
    /// One item that passed.
    pub fn passed() -> Self {
        Self {
            total: 1,
            successful: 1,
            failed: 0,
        }
    }

    /// One item that failed.
    pub fn failed() -> Self {
        Self {
            total: 1,
            successful: 0,
            failed: 1,
        }
    }

    pub fn from_outcome(ok: bool) -> Self {
        if ok { Self::passed() } else { Self::failed() }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.successful += other.successful;
        self.failed += other.failed;
    }
}

/// Overall assessment of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::Fair => "Fair",
            Verdict::Poor => "Poor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Excellent => "All conversions successful with no warnings",
            Verdict::Good => "All conversions successful with some warnings",
            Verdict::Fair => "Most conversions successful, some issues detected",
            Verdict::Poor => "Significant conversion issues detected",
        }
    }
}

/// Quality metrics for one validation run.
///
/// Only the run that produced it can append findings; callers get a slice.
#[derive(Debug, Clone, Serialize)]
pub struct QualityMetrics {
    pub total_items: usize,
    pub successful: usize,
    pub failed: usize,
    /// Number of warning-severity findings in the run.
    pub items_with_warnings: usize,
    #[serde(rename = "processing_time_secs", serialize_with = "serialize_secs")]
    pub processing_time: Duration,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    findings: Vec<Finding>,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl QualityMetrics {
    pub(crate) fn new(
        tally: Tally,
        findings: Vec<Finding>,
        processing_time: Duration,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let items_with_warnings = findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count();

        Self {
            total_items: tally.total,
            successful: tally.successful,
            failed: tally.failed,
            items_with_warnings,
            processing_time,
            started_at,
            finished_at,
            findings,
        }
    }

    /// All findings in accumulation order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one severity, in accumulation order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Warning)
    }

    /// `successful / total`, or 0 when nothing was validated.
    pub fn success_rate(&self) -> f64 {
        ratio(self.successful, self.total_items)
    }

    /// `failed / total`, or 0 when nothing was validated.
    pub fn failure_rate(&self) -> f64 {
        ratio(self.failed, self.total_items)
    }

    pub fn verdict(&self) -> Verdict {
        if self.failed == 0 {
            if self.items_with_warnings == 0 {
                Verdict::Excellent
            } else {
                Verdict::Good
            }
        } else if self.failure_rate() < 0.1 {
            Verdict::Fair
        } else {
            Verdict::Poor
        }
    }
}

pub(crate) fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
