//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors that can occur while building redaction patterns.
///
/// Scanning and replacement never fail; only compiling a caller-supplied
/// pattern does.
#[derive(Error, Debug)]
pub enum RedactionError {
    /// Failed to compile a regex pattern.
    #[error("pattern error in '{name}': {source}")]
    Pattern {
        /// Name of the offending pattern (or the raw regex for unnamed path patterns).
        name: String,
        #[source]
        source: regex::Error,
    },
}

impl RedactionError {
    /// Create a pattern compilation error.
    pub fn pattern(name: impl Into<String>, source: regex::Error) -> Self {
        RedactionError::Pattern {
            name: name.into(),
            source,
        }
    }
}
