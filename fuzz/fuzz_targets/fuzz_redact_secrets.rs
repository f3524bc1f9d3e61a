//! Fuzz target for secret redaction.
//!
//! Redaction and detection must never panic, detection offsets must land on
//! character boundaries, and text without detections must come back as is.

#![no_main]

use ds_redact::{RedactionConfig, SecretRedactor};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static REDACTOR: Lazy<SecretRedactor> =
    Lazy::new(|| SecretRedactor::new(RedactionConfig::default()));

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let redacted = REDACTOR.redact(&text);

    let detected = REDACTOR.detect(&text);
    for m in &detected.matches {
        assert!(text.is_char_boundary(m.offset));
        assert_eq!(&text[m.offset..m.offset + m.matched_value.len()], m.matched_value);
    }
    if !detected.found {
        assert_eq!(redacted, text);
    }
});
