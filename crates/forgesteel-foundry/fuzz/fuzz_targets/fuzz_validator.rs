//! Fuzz target for quality validation.
//!
//! Input is split in two at the first NUL byte: original export, then
//! converted actor.

#![no_main]

use forgesteel_foundry::{Catalog, QualityValidator, build_report};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let mut parts = data.splitn(2, |&b| b == 0);
    let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
        return;
    };
    let (Ok(original), Ok(converted)) = (
        serde_json::from_slice::<Value>(first),
        serde_json::from_slice::<Value>(second),
    ) else {
        return;
    };

    let validator = QualityValidator::new();
    let metrics = validator.run_full_validation(&original, &converted, &Catalog::empty());
    assert_eq!(metrics.successful + metrics.failed, metrics.total_items);
    let _ = build_report(&metrics);
});
