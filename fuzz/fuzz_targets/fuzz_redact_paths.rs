//! Fuzz target for path redaction.
//!
//! Tests that path redaction and the path-shape check handle arbitrary input
//! without panicking.

#![no_main]

use ds_redact::{PathConfig, PathRedactor};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

static REDACTOR: Lazy<PathRedactor> = Lazy::new(|| {
    PathRedactor::new(PathConfig {
        base_paths: BTreeSet::from(["/srv/app".to_string(), "/srv/app/vendor".to_string()]),
        auto_detect_base_paths: false,
        ..PathConfig::default()
    })
});

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let _ = REDACTOR.redact(&text);
    let _ = REDACTOR.contains_paths(&text);
});
