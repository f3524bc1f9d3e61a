//! End-to-end behavior of the sanitization pipeline.

use ds_core::ds_redact::{PathConfig, PathRedactor, RedactionConfig, SecretRedactor};
use ds_core::{
    generic_messages, Context, EnvironmentMode, ErrorInput, SanitizationPolicy, Sanitizer,
    SYNTHETIC_TYPE_NAME, TRUNCATION_MARKER,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

fn sanitizer_in(environment: EnvironmentMode) -> Sanitizer {
    let paths = PathRedactor::new(PathConfig {
        base_paths: BTreeSet::from(["/opt/service".to_string()]),
        auto_detect_base_paths: false,
        ..PathConfig::default()
    });
    Sanitizer::with_redactors(
        SanitizationPolicy::default().with_environment(environment),
        SecretRedactor::new(RedactionConfig::default()),
        paths,
    )
}

#[test]
fn test_hundred_sequential_ids_are_distinct() {
    let sanitizer = sanitizer_in(EnvironmentMode::Test);
    let ids: HashSet<String> = (0..100)
        .map(|i| {
            sanitizer
                .sanitize(format!("failure {}", i), None)
                .internal
                .correlation_id
                .into_string()
        })
        .collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_production_timeout_scenario() {
    let sanitizer = sanitizer_in(EnvironmentMode::Production);
    let out = sanitizer.sanitize(
        ErrorInput::standard("Error", "Request timed out after 5000ms"),
        None,
    );
    assert_eq!(
        out.external.message,
        "The operation timed out. Please try again."
    );
}

#[test]
fn test_development_truncation_scenario() {
    let sanitizer = Sanitizer::with_redactors(
        SanitizationPolicy::default()
            .with_environment(EnvironmentMode::Development)
            .with_max_external_length(50),
        SecretRedactor::default(),
        PathRedactor::default(),
    );
    let out = sanitizer.sanitize("x".repeat(100), None);
    assert!(out.external.message.chars().count() <= 53);
    assert!(out.external.message.ends_with(TRUNCATION_MARKER));
    assert_eq!(out.internal.message.len(), 100);
}

#[test]
fn test_io_errors_classify_by_kind() {
    let sanitizer = sanitizer_in(EnvironmentMode::Production);
    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "10.0.0.7:5432");
    let out = sanitizer.sanitize(err, None);
    assert_eq!(out.external.type_name, "ConnectionRefused");
    assert_eq!(
        out.external.message,
        "A network error occurred. Please check your connection and try again."
    );
    assert_eq!(out.internal.message, "10.0.0.7:5432");
}

#[test]
fn test_panic_payload_is_sanitized() {
    let sanitizer = sanitizer_in(EnvironmentMode::Development);
    let payload = std::panic::catch_unwind(|| {
        panic!("worker died holding api_key=sk_live_abcdef123456");
    })
    .unwrap_err();

    let out = sanitizer.sanitize(ErrorInput::from_panic(payload.as_ref()), None);
    assert_eq!(out.external.type_name, SYNTHETIC_TYPE_NAME);
    assert_eq!(out.external.message, "worker died holding [REDACTED]");
}

#[test]
fn test_opaque_values_are_accepted() {
    let sanitizer = sanitizer_in(EnvironmentMode::Test);
    let out = sanitizer.sanitize(ErrorInput::from_opaque(&(404, "missing")), None);
    assert_eq!(out.external.type_name, SYNTHETIC_TYPE_NAME);
    assert_eq!(out.external.message, "(404, \"missing\")");
}

#[test]
fn test_empty_message_is_a_no_op() {
    let sanitizer = sanitizer_in(EnvironmentMode::Development);
    let out = sanitizer.sanitize("", None);
    assert_eq!(out.external.message, "");
    assert!(out.external.correlation_id.is_some());
}

#[test]
fn test_internal_record_serializes_for_logging() {
    let sanitizer = sanitizer_in(EnvironmentMode::Production);
    let mut context = Context::new();
    context.insert("route".to_string(), serde_json::json!("/v1/orders"));
    let out = sanitizer.sanitize(
        ErrorInput::standard("DbError", "password=hunter2 rejected").with_stack("at db.rs:1"),
        Some(context),
    );

    let json = out.internal.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["correlation_id"], out.internal.correlation_id.as_str());
    assert_eq!(value["type"], "DbError");
    assert_eq!(value["message"], "password=hunter2 rejected");
    assert_eq!(value["stack"], "at db.rs:1");
    assert_eq!(value["context"]["route"], "/v1/orders");
    assert!(value["timestamp"].is_string());

    let external = serde_json::to_value(&out.external).unwrap();
    assert!(!external.to_string().contains("hunter2"));
    assert_eq!(external["type"], "DbError");
}

#[test]
fn test_safe_error_from_sanitized_keeps_internal_record() {
    let sanitizer = sanitizer_in(EnvironmentMode::Development);
    let input = ErrorInput::standard("IoError", "read failed")
        .with_stack("at /opt/service/src/io.rs:12\nat /home/alice/.cargo/registry/src/index.crates.io-6f17d22bba15001f/tokio-1.0/src/rt.rs:4");
    let sanitized = sanitizer.sanitize(input, None);
    let err = sanitizer.to_safe_error(&sanitized);

    assert_eq!(err.correlation_id(), sanitized.correlation_id());
    assert_eq!(
        err.stack(),
        Some("at [BASE_PATH]/src/io.rs:12\nat [DEPS]/tokio-1.0/src/rt.rs:4")
    );
    assert!(sanitized.internal.stack.unwrap().contains("/opt/service"));
}

proptest! {
    #[test]
    fn prop_production_output_is_always_generic(
        prefix in "[A-Za-z ]{0,30}",
        user in "[a-z]{3,10}",
        secret in "[A-Za-z0-9]{8,20}",
    ) {
        let sanitizer = sanitizer_in(EnvironmentMode::Production);
        let message = format!("{} /home/{}/app.rs password={}", prefix, user, secret);
        let out = sanitizer.sanitize(ErrorInput::standard("Error", message), None);
        prop_assert!(generic_messages().contains(&out.external.message.as_str()));
    }

    #[test]
    fn prop_truncation_bound_holds(message in "[a-z ]{0,300}", max in 1usize..120) {
        let sanitizer = Sanitizer::with_redactors(
            SanitizationPolicy::default()
                .with_environment(EnvironmentMode::Development)
                .with_max_external_length(max),
            SecretRedactor::default(),
            PathRedactor::default(),
        );
        let redacted = sanitizer.redact_secrets(&message);
        let out = sanitizer.sanitize(message, None).external.message;

        prop_assert!(out.chars().count() <= max + 3);
        prop_assert_eq!(
            out.ends_with(TRUNCATION_MARKER),
            redacted.chars().count() > max
        );
    }
}
