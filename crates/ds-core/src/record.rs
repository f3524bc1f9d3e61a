//! Records produced by sanitization.
//!
//! The internal record keeps everything and stays on the trusted side. The
//! external record and [`SafeError`] are the only artifacts meant to cross
//! the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::correlation::CorrelationId;

/// Caller-supplied key/value context, kept only in the internal record.
pub type Context = BTreeMap<String, serde_json::Value>;

/// Full-fidelity record for operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalRecord {
    pub correlation_id: CorrelationId,
    #[serde(rename = "type")]
    pub type_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: Context,
    pub timestamp: DateTime<Utc>,
}

impl InternalRecord {
    /// Single-line JSON suitable for a log sink.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Record safe to show to an untrusted audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Result of one `sanitize` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizedError {
    pub external: ExternalRecord,
    pub internal: InternalRecord,
}

impl SanitizedError {
    pub fn correlation_id(&self) -> &CorrelationId {
        &self.internal.correlation_id
    }
}

/// Error value carrying only sanitized data.
///
/// The correlation id is always available through [`SafeError::correlation_id`],
/// whether or not it is shown in the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeError {
    message: String,
    type_name: String,
    correlation_id: CorrelationId,
    stack: Option<String>,
    show_reference: bool,
}

impl SafeError {
    pub(crate) fn new(
        external: &ExternalRecord,
        correlation_id: CorrelationId,
        stack: Option<String>,
    ) -> Self {
        Self {
            message: external.message.clone(),
            type_name: external.type_name.clone(),
            show_reference: external.correlation_id.is_some(),
            correlation_id,
            stack,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Type name of the original error.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    /// Redacted stack, absent when stripped by policy.
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

impl fmt::Display for SafeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_reference {
            write!(f, "{} (ref: {})", self.message, self.correlation_id)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for SafeError {}
