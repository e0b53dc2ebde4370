//! Conversion quality validation.
//!
//! A [`QualityValidator`] runs a fixed sequence of checks over an original
//! export and its converted actor. Each check yields [`Finding`]s and a local
//! tally; a [`ValidationRun`] folds them into [`QualityMetrics`], which
//! [`build_report`] renders as text.

mod checks;
mod collaborators;
mod finding;
mod metrics;
mod report;
mod run;
mod validator;

pub use checks::{
    AbilityCompletenessCheck, CatalogMappingCheck, CheckContext, CheckOutcome,
    DescriptionTransferCheck, LevelConsistencyCheck, QualityCheck, StructureCheck,
    TextEncodingCheck, default_checks,
};
pub use collaborators::{
    AbilityComparator, AbilityComparison, DescriptionAuditor, JsonRoundTrip, LevelGatedAbilities,
    NameMatchAuditor, RejectDamagedText, TextSafety, TransferAudit,
};
pub use finding::{CheckKind, Finding, Severity};
pub use metrics::{QualityMetrics, Tally, Verdict};
pub use report::{DEFAULT_LISTING_CAP, build_report, render_report};
pub use run::ValidationRun;
pub use validator::{QualityValidator, validate_conversion_with_quality};
