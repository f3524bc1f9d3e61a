//! Fuzz target for the full sanitization pipeline.
//!
//! Checks the external message length bound and production opacity for
//! arbitrary error inputs.

#![no_main]

use arbitrary::Arbitrary;
use ds_core::ds_redact::{PathConfig, PathRedactor, SecretRedactor};
use ds_core::{
    generic_messages, EnvironmentMode, ErrorInput, SanitizationPolicy, Sanitizer,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    type_name: String,
    message: String,
    stack: Option<String>,
    production: bool,
    max_external_length: u8,
}

fuzz_target!(|input: Input| {
    let environment = if input.production {
        EnvironmentMode::Production
    } else {
        EnvironmentMode::Development
    };
    let max = usize::from(input.max_external_length).max(1);
    let sanitizer = Sanitizer::with_redactors(
        SanitizationPolicy::default()
            .with_environment(environment)
            .with_max_external_length(max),
        SecretRedactor::default(),
        PathRedactor::new(PathConfig {
            auto_detect_base_paths: false,
            ..PathConfig::default()
        }),
    );

    let mut error = ErrorInput::standard(input.type_name, input.message);
    if let Some(stack) = input.stack {
        error = error.with_stack(stack);
    }

    let sanitized = sanitizer.sanitize(error, None);
    assert!(sanitized.external.message.chars().count() <= max + 3);
    if input.production {
        let message = sanitized.external.message.trim_end_matches("...");
        assert!(generic_messages().iter().any(|g| g.starts_with(message)));
    }

    let _ = sanitizer.to_safe_error(&sanitized).to_string();
});
