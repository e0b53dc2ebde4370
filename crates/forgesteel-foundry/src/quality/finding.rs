//! Findings produced by quality checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which sub-check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Name, document type and required system fields.
    Structure,
    /// Detected level against the converted class level.
    LevelConsistency,
    /// Expected abilities present at the detected level.
    AbilityCompleteness,
    /// Section descriptions carried over to items.
    DescriptionTransfer,
    /// Names and descriptions survive JSON serialization.
    TextEncoding,
    /// Share of items linked to the reference catalog.
    CatalogMapping,
}

impl CheckKind {
    /// Get a human-readable label for the check.
    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::Structure => "Structure",
            CheckKind::LevelConsistency => "Level Consistency",
            CheckKind::AbilityCompleteness => "Ability Completeness",
            CheckKind::DescriptionTransfer => "Description Transfer",
            CheckKind::TextEncoding => "Text Encoding",
            CheckKind::CatalogMapping => "Catalog Mapping",
        }
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, no action needed.
    Info,
    /// Conversion succeeded but something should be reviewed.
    Warning,
    /// Conversion is wrong or incomplete.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Outcome of one quality check on one aspect of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Check that produced this finding.
    pub check: CheckKind,
    /// Whether the checked aspect is acceptable.
    pub is_valid: bool,
    /// Human-readable description.
    pub message: String,
    pub severity: Severity,
    /// Structured supporting data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Finding {
    /// Create a new finding.
    pub fn new(
        check: CheckKind,
        severity: Severity,
        is_valid: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check,
            is_valid,
            message: message.into(),
            severity,
            details: None,
        }
    }

    /// An invalid, error-severity finding.
    pub fn error(check: CheckKind, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Error, false, message)
    }

    /// A warning. The aspect is still considered valid.
    pub fn warning(check: CheckKind, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Warning, true, message)
    }

    pub fn info(check: CheckKind, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Info, true, message)
    }

    /// Set the details payload.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
