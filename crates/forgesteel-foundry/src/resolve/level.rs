//! Character level detection from a Forgesteel export.
//!
//! A hero's level can live in three places and exports disagree about which
//! one is filled in. Sources are tried in this order:
//!
//! 1. `level` on the character itself
//! 2. `class.level`
//! 3. the highest `level` in `class.featuresByLevel` (missing entries count
//!    as 1), a proxy for the most advanced unlocked tier

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::RecordExt;

use super::normalize::{Fractions, LevelFormatError, coerce};
use super::resolver::{ConsistencyReport, FieldResolver, Resolution};
use super::source::{CandidateSource, CanonicalRange, Extraction};

/// Valid hero levels.
pub const LEVEL_RANGE: CanonicalRange = CanonicalRange::new(1, 20, 1);

/// Level candidate sources in priority order.
pub static LEVEL_SOURCES: [CandidateSource; 3] = [
    CandidateSource::new("character.level", "Top-level character field", character_level),
    CandidateSource::new("class.level", "Class-level field", class_level),
    CandidateSource::new("featuresByLevel", "Calculated from features", features_by_level),
];

/// A hero level, always within `[1, 20]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(20);

    /// Create a level if `value` is in range.
    pub fn new(value: i64) -> Option<Self> {
        if LEVEL_RANGE.contains(value) {
            Some(Level(value as u8))
        } else {
            None
        }
    }

    /// Create a level, clamping out-of-range values.
    pub fn saturating(value: i64) -> Self {
        Level(LEVEL_RANGE.clamp(value) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::MIN
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Level {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Level::new(value).ok_or_else(|| {
            format!(
                "level {} outside valid range {}-{}",
                value, LEVEL_RANGE.min, LEVEL_RANGE.max
            )
        })
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        i64::from(level.0)
    }
}

fn lenient(value: &Value) -> Extraction {
    match coerce(value, Fractions::Truncate) {
        Ok(raw) => Extraction::Raw(raw),
        Err(err) => Extraction::Malformed(err),
    }
}

fn character_level(record: &Value) -> Extraction {
    record.field("level").map_or(Extraction::Absent, lenient)
}

fn class_level(record: &Value) -> Extraction {
    record
        .path(&["class", "level"])
        .map_or(Extraction::Absent, lenient)
}

fn features_by_level(record: &Value) -> Extraction {
    let tiers = record
        .field("class")
        .map(|class| class.items("featuresByLevel"))
        .unwrap_or(&[]);
    if tiers.is_empty() {
        return Extraction::Absent;
    }

    let mut highest = i64::MIN;
    for tier in tiers {
        let level = match tier {
            Value::Object(_) => match tier.field("level") {
                None => 1,
                Some(value) => match coerce(value, Fractions::Truncate) {
                    Ok(level) => level,
                    Err(err) => return Extraction::Malformed(err),
                },
            },
            other => {
                return Extraction::Malformed(LevelFormatError::Unrecognized {
                    value: other.to_string(),
                    kind: "feature tier",
                });
            }
        };
        highest = highest.max(level);
    }

    Extraction::Raw(highest)
}

/// Priority-based level detection.
#[derive(Debug, Clone, Copy)]
pub struct LevelResolver {
    inner: FieldResolver,
}

impl LevelResolver {
    pub fn new() -> Self {
        Self {
            inner: FieldResolver::new("level", &LEVEL_SOURCES, LEVEL_RANGE),
        }
    }

    /// Resolve the level with provenance and diagnostics.
    pub fn resolve(&self, record: &Value) -> Resolution {
        self.inner.resolve(record)
    }

    /// Resolve the level and return only the canonical value.
    pub fn detect_level(&self, record: &Value) -> Level {
        Level::saturating(self.inner.resolve(record).value)
    }

    /// Compare all level sources against each other.
    pub fn check_consistency(&self, record: &Value) -> ConsistencyReport {
        self.inner.check_consistency(record)
    }

    /// Compare all level sources, reusing an earlier resolution of `record`.
    pub fn check_consistency_with(
        &self,
        record: &Value,
        resolution: &Resolution,
    ) -> ConsistencyReport {
        self.inner.check_consistency_with(record, resolution)
    }

    /// Level sources in priority order.
    pub fn sources(&self) -> &'static [CandidateSource] {
        self.inner.sources()
    }
}

impl Default for LevelResolver {
    fn default() -> Self {
        Self::new()
    }
}
