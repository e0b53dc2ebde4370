//! Fuzz target for level resolution.
//!
//! Resolution must never panic and must always land in [1, 20], whatever
//! JSON the export contains.

#![no_main]

use forgesteel_foundry::{LevelResolver, normalize};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(record) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let resolver = LevelResolver::new();
    let resolution = resolver.resolve(&record);
    assert!((1..=20).contains(&resolution.value));

    let report = resolver.check_consistency(&record);
    assert_eq!(report.resolved, resolution.value);
    let _ = report.summary();

    let _ = normalize(&record);
});
