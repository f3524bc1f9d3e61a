//! Fuzz target for sanitizer.json parsing.
//!
//! Parsing, validation and component building must return errors for bad
//! input, never panic.

#![no_main]

use ds_config::{validate_config, SanitizerConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = SanitizerConfig::parse_json(text) else {
        return;
    };
    if validate_config(&config).is_ok() {
        let _ = config.secret_redactor();
        let _ = config.path_config();
    }
});
