//! Quality validator: runs every check in a fixed order over one conversion.

use serde_json::Value;

use crate::catalog::Catalog;
use crate::config::ValidatorConfig;
use crate::resolve::LevelResolver;

use super::checks::{CheckContext, QualityCheck, default_checks};
use super::collaborators::{
    AbilityComparator, DescriptionAuditor, JsonRoundTrip, LevelGatedAbilities, NameMatchAuditor,
    TextSafety,
};
use super::metrics::QualityMetrics;
use super::report::render_report;
use super::run::ValidationRun;

/// Audits a converted actor against the export it came from.
///
/// Holds no per-run state; every call to
/// [`run_full_validation`](Self::run_full_validation) starts a fresh
/// [`ValidationRun`].
pub struct QualityValidator {
    config: ValidatorConfig,
    resolver: LevelResolver,
    abilities: Box<dyn AbilityComparator>,
    descriptions: Box<dyn DescriptionAuditor>,
    text: Box<dyn TextSafety>,
    checks: Vec<Box<dyn QualityCheck>>,
}

impl QualityValidator {
    /// Create a validator with default configuration and collaborators.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            resolver: LevelResolver::new(),
            abilities: Box::new(LevelGatedAbilities),
            descriptions: Box::new(NameMatchAuditor),
            text: Box::new(JsonRoundTrip),
            checks: default_checks(),
        }
    }

    pub fn with_ability_comparator(mut self, comparator: impl AbilityComparator + 'static) -> Self {
        self.abilities = Box::new(comparator);
        self
    }

    pub fn with_description_auditor(mut self, auditor: impl DescriptionAuditor + 'static) -> Self {
        self.descriptions = Box::new(auditor);
        self
    }

    pub fn with_text_safety(mut self, safety: impl TextSafety + 'static) -> Self {
        self.text = Box::new(safety);
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run every check and aggregate the results.
    ///
    /// Never fails: missing or malformed data becomes findings.
    pub fn run_full_validation(
        &self,
        original: &Value,
        converted: &Value,
        catalog: &Catalog,
    ) -> QualityMetrics {
        let mut run = ValidationRun::start();
        let resolution = self.resolver.resolve(original);

        let ctx = CheckContext {
            original,
            converted,
            catalog,
            config: &self.config,
            resolver: &self.resolver,
            resolution: &resolution,
            abilities: self.abilities.as_ref(),
            descriptions: self.descriptions.as_ref(),
            text: self.text.as_ref(),
        };

        for check in &self.checks {
            let outcome = check.check(&ctx);
            tracing::debug!(
                check = check.kind().label(),
                findings = outcome.findings.len(),
                failed = outcome.tally.failed,
                "check complete"
            );
            run.record(outcome);
        }

        let metrics = run.end();
        tracing::info!(
            total = metrics.total_items,
            failed = metrics.failed,
            warnings = metrics.items_with_warnings,
            verdict = metrics.verdict().label(),
            "quality validation finished"
        );
        metrics
    }

    /// Render the text report using the configured listing cap.
    pub fn build_report(&self, metrics: &QualityMetrics) -> String {
        render_report(metrics, self.config.report_listing_cap)
    }
}

impl Default for QualityValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate one conversion with defaults and return the report text.
pub fn validate_conversion_with_quality(
    original: &Value,
    converted: &Value,
    catalog: &Catalog,
) -> String {
    let validator = QualityValidator::new();
    let metrics = validator.run_full_validation(original, converted, catalog);
    validator.build_report(&metrics)
}
