//! Sanitization pipeline.
//!
//! `sanitize` issues a correlation id, builds the internal record, computes
//! the external message (secret-redacted outside production, generic inside
//! it) and truncates it to the policy limit.

use chrono::Utc;
use ds_redact::{DetectionResult, PathRedactor, RedactionConfig, SecretRedactor};
use tracing::debug;

use crate::classify::categorize;
use crate::correlation::{CorrelationId, CorrelationIdGenerator};
use crate::input::ErrorInput;
use crate::policy::SanitizationPolicy;
use crate::record::{Context, ExternalRecord, InternalRecord, SafeError, SanitizedError};

/// Appended to truncated external messages.
pub const TRUNCATION_MARKER: &str = "...";

/// Turns errors into internal/external record pairs.
#[derive(Debug)]
pub struct Sanitizer {
    policy: SanitizationPolicy,
    secrets: SecretRedactor,
    paths: PathRedactor,
    ids: CorrelationIdGenerator,
}

impl Sanitizer {
    /// Sanitizer with default secret and path redactors.
    pub fn new(policy: SanitizationPolicy) -> Self {
        Self::with_redactors(
            policy,
            SecretRedactor::new(RedactionConfig::default()),
            PathRedactor::default(),
        )
    }

    pub fn with_redactors(
        policy: SanitizationPolicy,
        secrets: SecretRedactor,
        paths: PathRedactor,
    ) -> Self {
        debug!(
            environment = %policy.environment,
            enabled = policy.enabled,
            max_external_length = policy.max_external_length,
            "sanitizer created"
        );
        Self {
            policy,
            secrets,
            paths,
            ids: CorrelationIdGenerator::new(),
        }
    }

    pub fn policy(&self) -> &SanitizationPolicy {
        &self.policy
    }

    pub fn secret_redactor(&self) -> &SecretRedactor {
        &self.secrets
    }

    pub fn path_redactor(&self) -> &PathRedactor {
        &self.paths
    }

    /// Sanitize an error into an external record and an internal record.
    pub fn sanitize(&self, error: impl Into<ErrorInput>, context: Option<Context>) -> SanitizedError {
        let canonical = error.into().canonicalize();
        let correlation_id = self.ids.next_id();

        let message = if self.policy.uses_generic_messages() {
            let category = categorize(&canonical.type_name, &canonical.message);
            debug!(correlation_id = %correlation_id, %category, "mapped to generic message");
            category.generic_message().to_string()
        } else {
            debug!(correlation_id = %correlation_id, "redacting original message");
            self.secrets.redact(&canonical.message)
        };

        let external = ExternalRecord {
            message: truncate(&message, self.policy.max_external_length),
            correlation_id: self
                .policy
                .include_correlation_id
                .then(|| correlation_id.clone()),
            type_name: canonical.type_name.clone(),
        };

        let internal = InternalRecord {
            correlation_id,
            type_name: canonical.type_name,
            message: canonical.message,
            stack: canonical.stack,
            context: context.unwrap_or_default(),
            timestamp: Utc::now(),
        };

        SanitizedError { external, internal }
    }

    /// Sanitize and wrap the result in an error value. The internal record is
    /// dropped; use [`Sanitizer::sanitize`] and [`Sanitizer::to_safe_error`]
    /// to keep it.
    pub fn create_safe_error(&self, error: impl Into<ErrorInput>, context: Option<Context>) -> SafeError {
        let sanitized = self.sanitize(error, context);
        self.to_safe_error(&sanitized)
    }

    /// Error value for an already sanitized error.
    pub fn to_safe_error(&self, sanitized: &SanitizedError) -> SafeError {
        let stack = if self.policy.strips_stack() {
            None
        } else {
            sanitized
                .internal
                .stack
                .as_deref()
                .map(|stack| self.redact_stack(stack))
        };
        SafeError::new(
            &sanitized.external,
            sanitized.internal.correlation_id.clone(),
            stack,
        )
    }

    /// Secret redaction plus truncation. Never maps to generic messages.
    pub fn sanitize_message(&self, text: &str) -> String {
        truncate(&self.secrets.redact(text), self.policy.max_external_length)
    }

    pub fn redact_secrets(&self, text: &str) -> String {
        self.secrets.redact(text)
    }

    pub fn detect_secrets(&self, text: &str) -> DetectionResult {
        self.secrets.detect(text)
    }

    pub fn redact_paths(&self, text: &str) -> String {
        self.paths.redact(text)
    }

    pub fn contains_paths(&self, text: &str) -> bool {
        self.paths.contains_paths(text)
    }

    /// Secret redaction followed by path redaction.
    pub fn redact_stack(&self, stack: &str) -> String {
        self.paths.redact(&self.secrets.redact(stack))
    }

    /// Next correlation id from this instance.
    pub fn next_correlation_id(&self) -> CorrelationId {
        self.ids.next_id()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(SanitizationPolicy::default())
    }
}

/// Cut `text` to `max` characters, appending [`TRUNCATION_MARKER`] when cut.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
            out.push_str(&text[..cut]);
            out.push_str(TRUNCATION_MARKER);
            out
        }
    }
}
