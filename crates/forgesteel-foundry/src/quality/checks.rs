//! Quality checks run against a converted actor.

use serde_json::{Value, json};

use crate::catalog::Catalog;
use crate::config::ValidatorConfig;
use crate::record::RecordExt;
use crate::resolve::{Level, LevelResolver, Resolution};

use super::collaborators::{AbilityComparator, DescriptionAuditor, TextSafety};
use super::finding::{CheckKind, Finding};
use super::metrics::{Tally, ratio};

/// Everything a check may inspect during one run.
pub struct CheckContext<'a> {
    pub original: &'a Value,
    pub converted: &'a Value,
    pub catalog: &'a Catalog,
    pub config: &'a ValidatorConfig,
    pub resolver: &'a LevelResolver,
    /// Level resolution of `original`, computed once per run.
    pub resolution: &'a Resolution,
    pub abilities: &'a dyn AbilityComparator,
    pub descriptions: &'a dyn DescriptionAuditor,
    pub text: &'a dyn TextSafety,
}

impl CheckContext<'_> {
    pub fn level(&self) -> Level {
        Level::saturating(self.resolution.value)
    }

    /// Converted items, or an empty slice.
    pub fn items(&self) -> &[Value] {
        self.converted.items("items")
    }
}

/// Findings and item counts from one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub findings: Vec<Finding>,
    pub tally: Tally,
}

impl CheckOutcome {
    fn single(finding: Finding) -> Self {
        let tally = Tally::from_outcome(finding.is_valid);
        Self {
            findings: vec![finding],
            tally,
        }
    }
}

/// Trait for quality checks.
pub trait QualityCheck {
    fn kind(&self) -> CheckKind;

    /// Run the check. Checks never fail; problems become findings.
    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutcome;
}

/// Name, document type, `system` section and its required fields.
pub struct StructureCheck;

impl QualityCheck for StructureCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Structure
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let kind = self.kind();
        let converted = ctx.converted;
        let mut findings = Vec::new();

        if !converted.str_field("name").is_some_and(|n| !n.is_empty()) {
            findings.push(
                Finding::error(kind, "Character missing name").with_details(json!({
                    "original_name": ctx.original.field("name").cloned().unwrap_or(Value::Null)
                })),
            );
        }

        if converted.str_field("type") != Some(ctx.config.expected_type.as_str()) {
            findings.push(
                Finding::error(
                    kind,
                    format!("Character type is not '{}'", ctx.config.expected_type),
                )
                .with_details(json!({
                    "actual_type": converted.field("type").cloned().unwrap_or(Value::Null)
                })),
            );
        }

        match converted.field("system") {
            None => findings.push(Finding::error(kind, "Character missing system data")),
            Some(system) if !system.is_object() => findings.push(Finding::error(
                kind,
                "Character system data is not an object",
            )),
            Some(system) => {
                let missing: Vec<&str> = ctx
                    .config
                    .required_system_fields
                    .iter()
                    .map(String::as_str)
                    .filter(|field| !system.has_field(field))
                    .collect();
                if !missing.is_empty() {
                    findings.push(
                        Finding::error(
                            kind,
                            format!("Missing required system fields: {}", missing.join(", ")),
                        )
                        .with_details(json!({ "missing_fields": missing })),
                    );
                }
            }
        }

        if findings.is_empty() {
            return CheckOutcome::single(Finding::info(kind, "Document structure is valid"));
        }

        CheckOutcome {
            findings,
            tally: Tally::failed(),
        }
    }
}

/// Numeric equality, so `5.0` matches 5. Strings never match.
fn level_equals(level: &Value, detected: i64) -> bool {
    match level.as_i64() {
        Some(int) => int == detected,
        None => level.as_f64().is_some_and(|float| float == detected as f64),
    }
}

/// Detected level against the converted class item's level.
///
/// A mismatch is an error. Agreement with inconsistent sources is only a
/// warning: the conversion still used the resolved value.
pub struct LevelConsistencyCheck;

impl QualityCheck for LevelConsistencyCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::LevelConsistency
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let kind = self.kind();
        let detected = ctx.resolution.value;
        let consistency = ctx
            .resolver
            .check_consistency_with(ctx.original, ctx.resolution);

        let converted_level = ctx
            .items()
            .iter()
            .find(|item| item.str_field("type") == Some("class"))
            .and_then(|item| item.path(&["system", "level"]));

        if !converted_level.is_some_and(|level| level_equals(level, detected)) {
            let shown = converted_level.map_or_else(|| "none".to_string(), Value::to_string);
            return CheckOutcome::single(
                Finding::error(
                    kind,
                    format!("Level mismatch: detected {}, converted {}", detected, shown),
                )
                .with_details(json!({
                    "detected_level": detected,
                    "converted_level": converted_level.cloned().unwrap_or(Value::Null),
                    "sources_consistent": consistency.is_consistent,
                })),
            );
        }

        if !consistency.is_consistent {
            return CheckOutcome::single(
                Finding::warning(kind, "Level sources inconsistent but conversion successful")
                    .with_details(serde_json::to_value(&consistency).unwrap_or_default()),
            );
        }

        CheckOutcome::single(
            Finding::info(kind, format!("Level detection successful: {}", detected)).with_details(
                json!({
                    "detected_level": detected,
                    "source": ctx.resolution.source_key(),
                    "diagnostics": ctx.resolution.diagnostics,
                }),
            ),
        )
    }
}

/// Abilities expected at the detected level against converted ability items.
pub struct AbilityCompletenessCheck;

impl QualityCheck for AbilityCompletenessCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::AbilityCompleteness
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let kind = self.kind();
        let level = ctx.level();

        let source: Vec<&Value> = ctx
            .original
            .field("class")
            .map(|class| class.items("abilities"))
            .unwrap_or(&[])
            .iter()
            .collect();
        let converted: Vec<&Value> = ctx
            .items()
            .iter()
            .filter(|item| item.str_field("type") == Some("ability"))
            .collect();

        let comparison = ctx.abilities.compare_abilities(&source, &converted, level);
        let details = json!({
            "is_valid": comparison.is_valid,
            "expected_count": comparison.expected_count,
            "converted_count": comparison.converted_count,
            "level": level,
        });

        let finding = if comparison.is_valid {
            Finding::info(
                kind,
                format!(
                    "Ability conversion complete: {}/{}",
                    comparison.converted_count, comparison.expected_count
                ),
            )
        } else {
            Finding::error(
                kind,
                format!(
                    "Ability conversion incomplete: {}/{}",
                    comparison.converted_count, comparison.expected_count
                ),
            )
        };

        CheckOutcome::single(finding.with_details(details))
    }
}

/// Section descriptions carried over to converted items.
pub struct DescriptionTransferCheck;

impl QualityCheck for DescriptionTransferCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::DescriptionTransfer
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let kind = self.kind();
        let sections: Vec<&Value> = ctx
            .config
            .description_sections
            .iter()
            .filter_map(|section| ctx.original.field(section))
            .collect();

        let audit = ctx.descriptions.audit_transfers(&sections, ctx.items());
        let mut findings = Vec::new();

        if audit.failed_transfers > 0 {
            findings.push(
                Finding::error(
                    kind,
                    format!("Description transfer failures: {}", audit.failed_transfers),
                )
                .with_details(json!({
                    "failed_transfers": audit.failed_transfers,
                    "empty_descriptions": audit.empty_descriptions,
                })),
            );
        }

        if audit.empty_descriptions > 0 {
            findings.push(
                Finding::warning(kind, format!("Empty descriptions: {}", audit.empty_descriptions))
                    .with_details(json!({ "empty_count": audit.empty_descriptions })),
            );
        }

        if findings.is_empty() {
            findings.push(Finding::info(kind, "All descriptions transferred"));
        }

        CheckOutcome {
            findings,
            tally: Tally::from_outcome(audit.failed_transfers == 0),
        }
    }
}

/// Every name and description survives serialization unchanged.
pub struct TextEncodingCheck;

impl QualityCheck for TextEncodingCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::TextEncoding
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let kind = self.kind();
        let mut issues = Vec::new();

        if let Some(name) = ctx.converted.str_field("name") {
            if !ctx.text.round_trips_safely(name) {
                issues.push(format!("Character name '{}'", name));
            }
        }

        for item in ctx.items() {
            let item_name = item.str_field("name").unwrap_or_default();
            let label = if item_name.is_empty() { "Unnamed item" } else { item_name };

            if !item_name.is_empty() && !ctx.text.round_trips_safely(item_name) {
                issues.push(format!("Item '{}' name", label));
            }

            let description = item
                .path(&["system", "description", "value"])
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !description.is_empty() && !ctx.text.round_trips_safely(description) {
                issues.push(format!("Item '{}' description", label));
            }
        }

        if issues.is_empty() {
            return CheckOutcome::single(Finding::info(kind, "All text encoding is valid"));
        }

        CheckOutcome::single(
            Finding::error(
                kind,
                format!("Text encoding issues found: {} items", issues.len()),
            )
            .with_details(json!({ "encoding_issues": issues })),
        )
    }
}

/// Share of converted items linked to the reference catalog.
///
/// An item counts as mapped when it carries `_stats.compendiumSource` or an
/// icon other than the default one. A low rate is a warning, never a failure.
pub struct CatalogMappingCheck;

impl CatalogMappingCheck {
    fn is_mapped(item: &Value, default_icon: &str) -> bool {
        let has_source = item
            .path(&["_stats", "compendiumSource"])
            .is_some_and(|source| !source.is_null());
        let has_icon = item
            .str_field("img")
            .is_some_and(|img| !img.is_empty() && img != default_icon);
        has_source || has_icon
    }
}

impl QualityCheck for CatalogMappingCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::CatalogMapping
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let kind = self.kind();
        let items = ctx.items();
        let default_icon = ctx.config.default_icon.as_str();

        let (mapped, unmapped): (Vec<&Value>, Vec<&Value>) = items
            .iter()
            .partition(|item| Self::is_mapped(item, default_icon));
        let mapping_rate = ratio(mapped.len(), items.len());

        let finding = if mapping_rate < ctx.config.low_mapping_threshold {
            let unmapped_items: Vec<&str> = unmapped
                .iter()
                .take(ctx.config.unmapped_sample_size)
                .map(|item| item.str_field("name").unwrap_or("Unnamed item"))
                .collect();
            Finding::warning(
                kind,
                format!("Low compendium mapping rate: {:.1}%", mapping_rate * 100.0),
            )
            .with_details(json!({
                "mapping_rate": mapping_rate,
                "mapped_items": mapped.len(),
                "total_items": items.len(),
                "unmapped_items": unmapped_items,
                "catalog_entries": ctx.catalog.len(),
            }))
        } else {
            Finding::info(
                kind,
                format!("Good compendium mapping rate: {:.1}%", mapping_rate * 100.0),
            )
            .with_details(json!({
                "mapping_rate": mapping_rate,
                "catalog_entries": ctx.catalog.len(),
            }))
        };

        CheckOutcome {
            findings: vec![finding],
            tally: Tally::passed(),
        }
    }
}

/// Checks in the order they run.
pub fn default_checks() -> Vec<Box<dyn QualityCheck>> {
    vec![
        Box::new(StructureCheck),
        Box::new(LevelConsistencyCheck),
        Box::new(AbilityCompletenessCheck),
        Box::new(DescriptionTransferCheck),
        Box::new(TextEncodingCheck),
        Box::new(CatalogMappingCheck),
    ]
}
