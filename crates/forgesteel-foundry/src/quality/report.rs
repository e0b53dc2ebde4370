//! Plain-text quality report.

use super::finding::Finding;
use super::metrics::QualityMetrics;

/// Messages listed per severity block by [`build_report`].
pub const DEFAULT_LISTING_CAP: usize = 5;

/// Render the quality report for one run.
pub fn build_report(metrics: &QualityMetrics) -> String {
    render_report(metrics, DEFAULT_LISTING_CAP)
}

/// Render the report, listing at most `cap` errors and `cap` warnings.
///
/// Info findings are not issues and never appear in the issue blocks.
pub fn render_report(metrics: &QualityMetrics, cap: usize) -> String {
    let mut lines = vec![
        "=== Conversion Quality Report ===".to_string(),
        format!(
            "Processing time: {:.2} seconds",
            metrics.processing_time.as_secs_f64()
        ),
        format!("Total validation items: {}", metrics.total_items),
        format!("Successful conversions: {}", metrics.successful),
        format!("Failed conversions: {}", metrics.failed),
        format!("Items with warnings: {}", metrics.items_with_warnings),
        String::new(),
        format!("Overall success rate: {:.1}%", metrics.success_rate() * 100.0),
    ];

    let errors: Vec<&Finding> = metrics.errors().collect();
    let warnings: Vec<&Finding> = metrics.warnings().collect();

    if !errors.is_empty() || !warnings.is_empty() {
        lines.push(String::new());
        lines.push("=== Issues Found ===".to_string());
        lines.push(format!("Total issues: {}", errors.len() + warnings.len()));
        push_block(&mut lines, "Errors", &errors, cap);
        push_block(&mut lines, "Warnings", &warnings, cap);
    }

    let verdict = metrics.verdict();
    lines.push(String::new());
    lines.push("=== Overall Assessment ===".to_string());
    lines.push(format!("{}: {}", verdict.label(), verdict.description()));

    lines.join("\n")
}

fn push_block(lines: &mut Vec<String>, title: &str, findings: &[&Finding], cap: usize) {
    if findings.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{} ({}):", title, findings.len()));
    lines.extend(
        findings
            .iter()
            .take(cap)
            .map(|finding| format!("  - {}", finding.message)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::metrics::Tally;
    use crate::quality::CheckKind;
    use chrono::Utc;
    use std::time::Duration;

    fn metrics(tally: Tally, findings: Vec<Finding>) -> QualityMetrics {
        let now = Utc::now();
        QualityMetrics::new(tally, findings, Duration::from_millis(20), now, now)
    }

    #[test]
    fn test_clean_report() {
        let mut tally = Tally::default();
        tally += Tally::passed();
        tally += Tally::passed();
        let report = build_report(&metrics(
            tally,
            vec![Finding::info(CheckKind::TextEncoding, "All text encoding is valid")],
        ));

        assert!(report.starts_with("=== Conversion Quality Report ===\nProcessing time: 0.02 seconds\n"));
        assert!(report.contains("Overall success rate: 100.0%"));
        assert!(!report.contains("=== Issues Found ==="));
        assert!(report.ends_with(
            "=== Overall Assessment ===\nExcellent: All conversions successful with no warnings"
        ));
    }

    #[test]
    fn test_listing_is_capped() {
        let mut findings: Vec<Finding> = (1..=7)
            .map(|i| Finding::error(CheckKind::Structure, format!("error {}", i)))
            .collect();
        findings.push(Finding::warning(CheckKind::CatalogMapping, "low"));
        findings.push(Finding::info(CheckKind::LevelConsistency, "fine"));

        let report = build_report(&metrics(Tally::failed(), findings));

        assert!(report.contains("Total issues: 8"));
        assert!(report.contains("Errors (7):"));
        assert!(report.contains("  - error 5"));
        assert!(!report.contains("  - error 6"));
        assert!(report.contains("Warnings (1):\n  - low"));
        assert!(!report.contains("fine"));
        assert!(report.ends_with("Poor: Significant conversion issues detected"));
    }

    #[test]
    fn test_custom_cap() {
        let findings = vec![
            Finding::warning(CheckKind::CatalogMapping, "first"),
            Finding::warning(CheckKind::DescriptionTransfer, "second"),
        ];
        let report = render_report(&metrics(Tally::passed(), findings), 1);

        assert!(report.contains("  - first"));
        assert!(!report.contains("  - second"));
        assert!(report.ends_with("Good: All conversions successful with some warnings"));
    }

    #[test]
    fn test_fair_verdict_line() {
        let mut tally = Tally::default();
        for _ in 0..19 {
            tally += Tally::passed();
        }
        tally += Tally::failed();
        let report = build_report(&metrics(
            tally,
            vec![Finding::error(CheckKind::AbilityCompleteness, "Ability conversion incomplete: 3/4")],
        ));

        assert!(report.contains("Failed conversions: 1"));
        assert!(report.contains("Overall success rate: 95.0%"));
        assert!(report.ends_with(
            "=== Overall Assessment ===\nFair: Most conversions successful, some issues detected"
        ));
    }

    #[test]
    fn test_empty_metrics() {
        let report = build_report(&metrics(Tally::default(), Vec::new()));
        assert!(report.contains("Total validation items: 0"));
        assert!(report.contains("Overall success rate: 0.0%"));
    }
}
