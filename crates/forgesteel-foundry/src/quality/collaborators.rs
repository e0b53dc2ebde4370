//! Collaborators the validator consults for category-specific comparisons.
//!
//! The validator only folds their outputs into findings. Each trait has a
//! default implementation so a validator can run without a full converter.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::RecordExt;
use crate::resolve::{Level, normalize};

/// Result of comparing source abilities with converted ability items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityComparison {
    pub is_valid: bool,
    pub expected_count: usize,
    pub converted_count: usize,
}

/// Result of auditing description transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAudit {
    pub failed_transfers: usize,
    pub empty_descriptions: usize,
}

/// Compares source abilities with converted ability items.
pub trait AbilityComparator {
    fn compare_abilities(
        &self,
        source: &[&Value],
        converted: &[&Value],
        level: Level,
    ) -> AbilityComparison;
}

/// Audits whether section descriptions reached the converted items.
pub trait DescriptionAuditor {
    fn audit_transfers(&self, sections: &[&Value], items: &[Value]) -> TransferAudit;
}

/// Checks that text survives the target serialization unchanged.
pub trait TextSafety {
    fn round_trips_safely(&self, text: &str) -> bool;
}

/// Expects every source ability unlocked at or below the detected level.
///
/// An ability without a readable `level` is treated as level 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelGatedAbilities;

impl AbilityComparator for LevelGatedAbilities {
    fn compare_abilities(
        &self,
        source: &[&Value],
        converted: &[&Value],
        level: Level,
    ) -> AbilityComparison {
        let expected_count = source
            .iter()
            .filter(|ability| {
                let unlocked_at = ability.field("level").and_then(normalize).unwrap_or(1);
                unlocked_at <= i64::from(level)
            })
            .count();
        let converted_count = converted.len();

        AbilityComparison {
            is_valid: converted_count >= expected_count,
            expected_count,
            converted_count,
        }
    }
}

/// Matches sections to items by name and inspects their descriptions.
///
/// A section with a non-empty description fails when no item of the same
/// name (case-insensitive) carries a non-empty `system.description.value`.
/// Items whose description is present but blank, and that are not already
/// counted as failed transfers, count as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatchAuditor;

fn item_description(item: &Value) -> Option<&str> {
    item.path(&["system", "description", "value"])
        .and_then(Value::as_str)
}

fn has_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}

impl DescriptionAuditor for NameMatchAuditor {
    fn audit_transfers(&self, sections: &[&Value], items: &[Value]) -> TransferAudit {
        let mut failed_names = HashSet::new();

        for section in sections {
            if !has_text(section.str_field("description")) {
                continue;
            }
            let Some(name) = section.str_field("name") else {
                continue;
            };
            let name = name.to_lowercase();

            let transferred = items.iter().any(|item| {
                item.str_field("name")
                    .is_some_and(|n| n.to_lowercase() == name)
                    && has_text(item_description(item))
            });
            if !transferred {
                tracing::debug!(section = %name, "description not transferred");
                failed_names.insert(name);
            }
        }

        let empty_descriptions = items
            .iter()
            .filter(|item| {
                let blank = item_description(item).is_some_and(|d| d.trim().is_empty());
                let already_failed = item
                    .str_field("name")
                    .is_some_and(|n| failed_names.contains(&n.to_lowercase()));
                blank && !already_failed
            })
            .count();

        TransferAudit {
            failed_transfers: failed_names.len(),
            empty_descriptions,
        }
    }
}

/// JSON encode/decode round trip with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRoundTrip;

impl TextSafety for JsonRoundTrip {
    fn round_trips_safely(&self, text: &str) -> bool {
        serde_json::to_string(text)
            .ok()
            .and_then(|encoded| serde_json::from_str::<String>(&encoded).ok())
            .is_some_and(|decoded| decoded == text)
    }
}

/// [`JsonRoundTrip`] that also refuses text damaged before serialization.
///
/// U+FFFD and C0 control characters other than tab, newline and carriage
/// return survive the round trip but usually mark a broken import. Opt in
/// with `QualityValidator::with_text_safety`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectDamagedText;

impl TextSafety for RejectDamagedText {
    fn round_trips_safely(&self, text: &str) -> bool {
        let damaged = text.chars().any(|c| {
            c == '\u{FFFD}' || (c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
        });
        !damaged && JsonRoundTrip.round_trips_safely(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_gated_abilities() {
        let source = [
            json!({"name": "Hurl Element", "level": 1}),
            json!({"name": "Bifurcated Incineration", "level": 5}),
            json!({"name": "Untiered"}),
        ];
        let source: Vec<&Value> = source.iter().collect();
        let converted = [json!({"name": "Hurl Element"}), json!({"name": "Untiered"})];
        let converted: Vec<&Value> = converted.iter().collect();

        let low = LevelGatedAbilities.compare_abilities(&source, &converted, Level::MIN);
        assert_eq!(low.expected_count, 2);
        assert!(low.is_valid);

        let high = LevelGatedAbilities.compare_abilities(&source, &converted, Level::saturating(5));
        assert_eq!(high.expected_count, 3);
        assert_eq!(high.converted_count, 2);
        assert!(!high.is_valid);
    }

    #[test]
    fn test_name_match_auditor() {
        let ancestry = json!({"name": "Memonek", "description": "Logical beings"});
        let class = json!({"name": "Elementalist", "description": "Masters of the elements"});
        let career = json!({"name": "Sage", "description": ""});
        let sections = vec![&ancestry, &class, &career];

        let items = vec![
            json!({"name": "memonek", "system": {"description": {"value": "<p>Logical beings</p>"}}}),
            json!({"name": "Elementalist", "system": {"description": {"value": ""}}}),
            json!({"name": "Sage", "system": {"description": {"value": "  "}}}),
        ];

        let audit = NameMatchAuditor.audit_transfers(&sections, &items);
        assert_eq!(audit.failed_transfers, 1);
        assert_eq!(audit.empty_descriptions, 1);
    }

    #[test]
    fn test_name_match_auditor_missing_item() {
        let culture = json!({"name": "Wanderer", "description": "Nomadic"});
        let audit = NameMatchAuditor.audit_transfers(&[&culture], &[]);
        assert_eq!(audit.failed_transfers, 1);
        assert_eq!(audit.empty_descriptions, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let safety = JsonRoundTrip;
        assert!(safety.round_trips_safely("VÀLM"));
        assert!(safety.round_trips_safely("Keth \"Earth Cries\"\n<p>line</p>\t"));
        assert!(safety.round_trips_safely(""));
        assert!(safety.round_trips_safely("caf\u{FFFD}"));
        assert!(safety.round_trips_safely("bell\u{7}"));
        assert!(safety.round_trips_safely("vt\u{b}"));
    }

    #[test]
    fn test_reject_damaged_text() {
        let safety = RejectDamagedText;
        assert!(safety.round_trips_safely("Keth \"Earth Cries\"\r\n\t"));
        assert!(!safety.round_trips_safely("Broken \u{FFFD} text"));
        assert!(!safety.round_trips_safely("nul\u{0}byte"));
        assert!(!safety.round_trips_safely("vt\u{b}"));
    }
}
