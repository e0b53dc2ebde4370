//! forgesteel-foundry: level resolution and conversion auditing for
//! Forgesteel character exports converted to Foundry VTT actors.
//!
//! Two pieces do the real work:
//!
//! - **Resolver**: picks a field value from an ordered list of candidate
//!   sources, clamps it into its canonical range and reports provenance.
//! - **Quality validation**: audits a converted actor against the original
//!   export and produces severity-graded findings plus a text report.
//!
//! # Example
//!
//! ```no_run
//! use forgesteel_foundry::{Catalog, LevelResolver, QualityValidator, load_record};
//!
//! let original = load_record("hero.ds-hero").unwrap();
//! let converted = load_record("hero.foundry.json").unwrap();
//!
//! let resolution = LevelResolver::new().resolve(&original);
//! println!("Level {} from {:?}", resolution.value, resolution.source_key());
//!
//! let validator = QualityValidator::new();
//! let metrics = validator.run_full_validation(&original, &converted, &Catalog::empty());
//! println!("{}", validator.build_report(&metrics));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod quality;
pub mod record;
pub mod resolve;

pub use catalog::Catalog;
pub use config::ValidatorConfig;
pub use error::{ConvertError, Result};
pub use quality::{
    AbilityComparator, AbilityComparison, CheckKind, DescriptionAuditor, Finding, JsonRoundTrip,
    LevelGatedAbilities, NameMatchAuditor, QualityMetrics, QualityValidator, RejectDamagedText,
    Severity,
    TextSafety, TransferAudit, ValidationRun, Verdict, build_report,
    validate_conversion_with_quality,
};
pub use record::{RecordExt, load_record, write_record};
pub use resolve::{
    CandidateSource, CanonicalRange, ConsistencyReport, Diagnostic, DiagnosticKind,
    FieldResolver, Inconsistency, Level, LevelFormatError, LevelResolver, Resolution,
    normalize, try_normalize,
};
