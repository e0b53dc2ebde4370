//! Priority-based field resolution.
//!
//! A field with several candidate sources is resolved by trying the sources
//! in a fixed order, taking the first one that parses, and clamping it into a
//! canonical range. Resolution never fails: malformed sources are skipped and
//! a record with nothing usable gets the documented default.

mod level;
mod normalize;
mod resolver;
mod source;

pub use level::{LEVEL_RANGE, LEVEL_SOURCES, Level, LevelResolver};
pub use normalize::{LevelFormatError, normalize, try_normalize};
pub use resolver::{
    ConsistencyReport, Diagnostic, DiagnosticKind, FieldResolver, Inconsistency, Resolution,
};
pub use source::{CandidateSource, CanonicalRange, Extraction};
