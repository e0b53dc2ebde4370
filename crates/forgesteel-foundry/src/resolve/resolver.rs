//! Priority-ordered resolution over candidate sources.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::source::{CandidateSource, CanonicalRange, Extraction};

/// Kind of diagnostic raised while resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A present source held a value that could not be parsed.
    ParseFailure,
    /// The parsed value was outside the canonical range.
    Clamped,
    /// No source yielded a value.
    DefaultUsed,
}

/// Diagnostic event returned alongside a resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    pub message: String,
}

/// Result of resolving one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Field being resolved.
    pub field: &'static str,
    /// Canonical value, always inside the resolver's range.
    pub value: i64,
    /// Source that supplied the value, `None` when the default was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<CandidateSource>,
    /// Parsed value before clamping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<i64>,
    /// Whether clamping changed the value.
    pub clamped: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Key of the source that was used.
    pub fn source_key(&self) -> Option<&'static str> {
        self.source.map(|s| s.key)
    }

    /// Whether the documented default was used.
    pub fn used_default(&self) -> bool {
        self.source.is_none()
    }
}

/// A source whose raw value differs from the resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inconsistency {
    pub source: &'static str,
    pub value: i64,
    /// `value - resolved`.
    pub difference: i64,
}

/// Cross-source agreement for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub field: &'static str,
    /// Raw (unclamped) value of every source that parsed, in priority order.
    pub values_found: IndexMap<&'static str, i64>,
    /// Distinct raw values, ascending.
    pub distinct_values: Vec<i64>,
    /// Canonical value as returned by `resolve`.
    pub resolved: i64,
    pub is_consistent: bool,
    pub inconsistencies: Vec<Inconsistency>,
}

impl ConsistencyReport {
    /// One-line human summary of the check.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("Detected {}: {}", self.field, self.resolved)];

        if self.is_consistent {
            parts.push("Sources consistent".to_string());
        } else {
            parts.push("Sources inconsistent:".to_string());
            for inconsistency in &self.inconsistencies {
                parts.push(format!(
                    "  - {}: {} ({} difference)",
                    inconsistency.source, inconsistency.value, inconsistency.difference
                ));
            }
        }

        parts.join(" | ")
    }
}

/// Resolves one integer field from an ordered, static list of sources.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver {
    field: &'static str,
    sources: &'static [CandidateSource],
    range: CanonicalRange,
}

impl FieldResolver {
    pub const fn new(
        field: &'static str,
        sources: &'static [CandidateSource],
        range: CanonicalRange,
    ) -> Self {
        Self {
            field,
            sources,
            range,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Candidate sources in priority order.
    pub fn sources(&self) -> &'static [CandidateSource] {
        self.sources
    }

    pub fn range(&self) -> CanonicalRange {
        self.range
    }

    /// Resolve the field: first parseable source wins, then clamp.
    ///
    /// Never fails. Malformed sources are skipped, out-of-range values are
    /// clamped and a record with no usable source gets the range default.
    pub fn resolve(&self, record: &Value) -> Resolution {
        let mut diagnostics = Vec::new();

        for source in self.sources {
            let raw = match source.extract(record) {
                Extraction::Absent => continue,
                Extraction::Malformed(err) => {
                    tracing::warn!(
                        field = self.field,
                        source = source.key,
                        error = %err,
                        "invalid value format, trying next source"
                    );
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::ParseFailure,
                        source: Some(source.key),
                        message: format!("Invalid {} format in {}: {}", self.field, source.key, err),
                    });
                    continue;
                }
                Extraction::Raw(raw) => raw,
            };

            tracing::debug!(field = self.field, source = source.key, raw, "found value");

            let value = self.range.clamp(raw);
            let clamped = value != raw;
            if clamped {
                tracing::warn!(
                    field = self.field,
                    raw,
                    value,
                    min = self.range.min,
                    max = self.range.max,
                    "value normalized into valid range"
                );
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::Clamped,
                    source: Some(source.key),
                    message: format!(
                        "{} {} normalized to {} (valid range: {}-{})",
                        self.field, raw, value, self.range.min, self.range.max
                    ),
                });
            }

            tracing::info!(field = self.field, value, source = source.key, "resolved");

            return Resolution {
                field: self.field,
                value,
                source: Some(*source),
                raw: Some(raw),
                clamped,
                diagnostics,
            };
        }

        tracing::warn!(
            field = self.field,
            default = self.range.default,
            "no value detected, using default"
        );
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::DefaultUsed,
            source: None,
            message: format!(
                "No {} detected, using default {} {}",
                self.field, self.field, self.range.default
            ),
        });

        Resolution {
            field: self.field,
            value: self.range.default,
            source: None,
            raw: None,
            clamped: false,
            diagnostics,
        }
    }

    /// Compare every source against the others and against `resolve`.
    pub fn check_consistency(&self, record: &Value) -> ConsistencyReport {
        self.check_consistency_with(record, &self.resolve(record))
    }

    /// Like [`check_consistency`](Self::check_consistency), reusing a
    /// resolution already computed for `record`.
    pub fn check_consistency_with(
        &self,
        record: &Value,
        resolution: &Resolution,
    ) -> ConsistencyReport {
        let mut values_found = IndexMap::new();
        for source in self.sources {
            if let Extraction::Raw(raw) = source.extract(record) {
                values_found.insert(source.key, raw);
            }
        }

        let distinct: BTreeSet<i64> = values_found.values().copied().collect();
        let is_consistent = distinct.len() <= 1;
        let resolved = resolution.value;

        let inconsistencies = if is_consistent {
            Vec::new()
        } else {
            values_found
                .iter()
                .filter(|&(_, &value)| value != resolved)
                .map(|(&source, &value)| Inconsistency {
                    source,
                    value,
                    difference: value - resolved,
                })
                .collect()
        };

        ConsistencyReport {
            field: self.field,
            values_found,
            distinct_values: distinct.into_iter().collect(),
            resolved,
            is_consistent,
            inconsistencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordExt;
    use crate::resolve::normalize::{Fractions, coerce};
    use serde_json::json;

    fn primary(record: &Value) -> Extraction {
        match record.field("primary") {
            None => Extraction::Absent,
            Some(v) => match coerce(v, Fractions::Truncate) {
                Ok(raw) => Extraction::Raw(raw),
                Err(err) => Extraction::Malformed(err),
            },
        }
    }

    fn secondary(record: &Value) -> Extraction {
        match record.field("secondary").and_then(Value::as_i64) {
            Some(raw) => Extraction::Raw(raw),
            None => Extraction::Absent,
        }
    }

    static SOURCES: [CandidateSource; 2] = [
        CandidateSource::new("primary", "Primary field", primary),
        CandidateSource::new("secondary", "Secondary field", secondary),
    ];

    const RESOLVER: FieldResolver =
        FieldResolver::new("rank", &SOURCES, CanonicalRange::new(0, 5, 2));

    #[test]
    fn test_generic_field_priority() {
        let resolution = RESOLVER.resolve(&json!({"primary": 3, "secondary": 4}));
        assert_eq!(resolution.value, 3);
        assert_eq!(resolution.source_key(), Some("primary"));
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_generic_field_fallthrough_and_clamp() {
        let resolution = RESOLVER.resolve(&json!({"primary": "none", "secondary": 9}));
        assert_eq!(resolution.value, 5);
        assert_eq!(resolution.raw, Some(9));
        assert!(resolution.clamped);
        let kinds: Vec<_> = resolution.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::ParseFailure, DiagnosticKind::Clamped]);
    }

    #[test]
    fn test_generic_field_default() {
        let resolution = RESOLVER.resolve(&json!({}));
        assert_eq!(resolution.value, 2);
        assert!(resolution.used_default());
        assert_eq!(resolution.diagnostics[0].kind, DiagnosticKind::DefaultUsed);
    }

    #[test]
    fn test_summary_lines() {
        let report = RESOLVER.check_consistency(&json!({"primary": 3, "secondary": 1}));
        assert!(!report.is_consistent);
        assert_eq!(
            report.summary(),
            "Detected rank: 3 | Sources inconsistent: |   - secondary: 1 (-2 difference)"
        );

        let report = RESOLVER.check_consistency(&json!({"primary": 3}));
        assert_eq!(report.summary(), "Detected rank: 3 | Sources consistent");
    }
}
