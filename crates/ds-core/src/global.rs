//! Process-wide default instances.
//!
//! Each handle holds an `Arc` behind a lock. Readers clone the `Arc` and keep
//! using it; reconfiguring swaps in a fresh instance and never mutates one
//! that callers may hold.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use ds_redact::{DetectionResult, PathRedactor, SecretRedactor};

use crate::input::ErrorInput;
use crate::record::{Context, SafeError, SanitizedError};
use crate::sanitizer::Sanitizer;

static SECRET_REDACTOR: Lazy<RwLock<Arc<SecretRedactor>>> =
    Lazy::new(|| RwLock::new(Arc::new(SecretRedactor::default())));

static PATH_REDACTOR: Lazy<RwLock<Arc<PathRedactor>>> =
    Lazy::new(|| RwLock::new(Arc::new(PathRedactor::default())));

static SANITIZER: Lazy<RwLock<Arc<Sanitizer>>> =
    Lazy::new(|| RwLock::new(Arc::new(Sanitizer::default())));

pub fn secret_redactor() -> Arc<SecretRedactor> {
    SECRET_REDACTOR.read().clone()
}

/// Replace the global secret redactor, returning the previous one.
pub fn configure_secret_redactor(redactor: SecretRedactor) -> Arc<SecretRedactor> {
    debug!(patterns = redactor.patterns().len(), "replacing global secret redactor");
    std::mem::replace(&mut *SECRET_REDACTOR.write(), Arc::new(redactor))
}

pub fn reset_secret_redactor() -> Arc<SecretRedactor> {
    configure_secret_redactor(SecretRedactor::default())
}

pub fn path_redactor() -> Arc<PathRedactor> {
    PATH_REDACTOR.read().clone()
}

/// Replace the global path redactor, returning the previous one.
pub fn configure_path_redactor(redactor: PathRedactor) -> Arc<PathRedactor> {
    debug!(base_paths = redactor.base_paths().len(), "replacing global path redactor");
    std::mem::replace(&mut *PATH_REDACTOR.write(), Arc::new(redactor))
}

pub fn reset_path_redactor() -> Arc<PathRedactor> {
    configure_path_redactor(PathRedactor::default())
}

pub fn sanitizer() -> Arc<Sanitizer> {
    SANITIZER.read().clone()
}

/// Replace the global sanitizer, returning the previous one.
pub fn configure_sanitizer(sanitizer: Sanitizer) -> Arc<Sanitizer> {
    debug!(environment = %sanitizer.policy().environment, "replacing global sanitizer");
    std::mem::replace(&mut *SANITIZER.write(), Arc::new(sanitizer))
}

pub fn reset_sanitizer() -> Arc<Sanitizer> {
    configure_sanitizer(Sanitizer::default())
}

// Convenience wrappers over the current instances.

pub fn redact_secrets(text: &str) -> String {
    secret_redactor().redact(text)
}

pub fn detect_secrets(text: &str) -> DetectionResult {
    secret_redactor().detect(text)
}

pub fn contains_secrets(text: &str) -> bool {
    secret_redactor().contains_secrets(text)
}

pub fn redact_paths(text: &str) -> String {
    path_redactor().redact(text)
}

pub fn contains_paths(text: &str) -> bool {
    path_redactor().contains_paths(text)
}

pub fn sanitize(error: impl Into<ErrorInput>, context: Option<Context>) -> SanitizedError {
    sanitizer().sanitize(error, context)
}

pub fn create_safe_error(error: impl Into<ErrorInput>, context: Option<Context>) -> SafeError {
    sanitizer().create_safe_error(error, context)
}

pub fn sanitize_message(text: &str) -> String {
    sanitizer().sanitize_message(text)
}
