//! Error sanitization for trust boundaries.
//!
//! A [`Sanitizer`] turns any error into a pair of records: an
//! [`InternalRecord`] with the full original detail, and an
//! [`ExternalRecord`] that is secret-redacted (or, in production, replaced by
//! a generic message) and length-limited. Both share a [`CorrelationId`] so an
//! operator can find the detail behind a user-visible failure.
//!
//! ```
//! use ds_core::{EnvironmentMode, ErrorInput, SanitizationPolicy, Sanitizer};
//!
//! let sanitizer = Sanitizer::new(
//!     SanitizationPolicy::default().with_environment(EnvironmentMode::Production),
//! );
//! let out = sanitizer.sanitize(
//!     ErrorInput::standard("Error", "Request timed out after 5000ms"),
//!     None,
//! );
//! assert_eq!(out.external.message, "The operation timed out. Please try again.");
//! assert_eq!(out.internal.message, "Request timed out after 5000ms");
//! ```

pub mod classify;
pub mod correlation;
pub mod global;
pub mod input;
pub mod policy;
pub mod record;
pub mod sanitizer;

pub use classify::{
    categorize, classify, generic_messages, ErrorCategory, DEFAULT_GENERIC_MESSAGE,
};
pub use correlation::{CorrelationId, CorrelationIdGenerator};
pub use input::{short_type_name, CanonicalError, ErrorInput, SYNTHETIC_TYPE_NAME};
pub use policy::{
    EnvironmentMode, SanitizationPolicy, DEFAULT_MAX_EXTERNAL_LENGTH, ENVIRONMENT_VAR,
};
pub use record::{Context, ExternalRecord, InternalRecord, SafeError, SanitizedError};
pub use sanitizer::{truncate, Sanitizer, TRUNCATION_MARKER};

// Re-export the redaction layer so callers need a single dependency.
pub use ds_redact;
