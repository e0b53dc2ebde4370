//! Candidate sources and canonical ranges.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalize::LevelFormatError;

/// Outcome of running one candidate source against a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The source has nothing to offer for this record.
    Absent,
    /// The source produced an integer (not yet clamped).
    Raw(i64),
    /// The source is present but its value could not be parsed.
    Malformed(LevelFormatError),
}

/// A named extraction rule over a record, paired with provenance text.
#[derive(Clone, Copy)]
pub struct CandidateSource {
    /// Stable key such as `class.level`.
    pub key: &'static str,
    /// Human-readable provenance.
    pub description: &'static str,
    extract: fn(&Value) -> Extraction,
}

impl CandidateSource {
    /// Create a candidate source.
    pub const fn new(
        key: &'static str,
        description: &'static str,
        extract: fn(&Value) -> Extraction,
    ) -> Self {
        Self {
            key,
            description,
            extract,
        }
    }

    /// Run the extraction rule.
    pub fn extract(&self, record: &Value) -> Extraction {
        (self.extract)(record)
    }
}

impl fmt::Debug for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateSource")
            .field("key", &self.key)
            .field("description", &self.description)
            .finish()
    }
}

// Sources are identified by key; the extraction function is not compared.
impl PartialEq for CandidateSource {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.description == other.description
    }
}

impl Serialize for CandidateSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CandidateSource", 2)?;
        state.serialize_field("key", self.key)?;
        state.serialize_field("description", self.description)?;
        state.end()
    }
}

/// Closed range a resolved value is clamped into, plus the fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRange {
    pub min: i64,
    pub max: i64,
    /// Used when no source yields a value.
    pub default: i64,
}

impl CanonicalRange {
    pub const fn new(min: i64, max: i64, default: i64) -> Self {
        Self { min, max, default }
    }

    /// Clamp a raw value into the range.
    pub fn clamp(&self, raw: i64) -> i64 {
        raw.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
