//! Ordered secret and path redaction for diagnostic text.
//!
//! Two independent pipelines:
//!
//! - **Secret redaction**: a [`PatternRegistry`] of named rules (built-ins plus
//!   caller additions) scanned in a fixed order by [`SecretRedactor`]. Each
//!   match is replaced with a marker, optionally followed by the last few
//!   characters of the original for debugging.
//! - **Path redaction**: [`PathRedactor`] rewrites base paths (home, working
//!   directory, or caller-supplied), then custom patterns, then a fixed set of
//!   system path shapes.
//!
//! Scanning never fails. Only compiling a caller-supplied pattern can return
//! an error.
//!
//! # Example
//!
//! ```
//! use ds_redact::{RedactionConfig, SecretRedactor};
//!
//! let redactor = SecretRedactor::new(RedactionConfig::default());
//! let out = redactor.redact("login failed: password=SuperSecret123!");
//! assert!(out.contains("[REDACTED]"));
//! assert!(!out.contains("SuperSecret123!"));
//! ```

pub mod error;
pub mod matcher;
pub mod path;
pub mod pattern;
pub mod secret;

pub use error::{RedactionError, Result};
pub use matcher::{MatchSpan, Matcher};
pub use path::{
    contains_paths, detect_base_paths, PathConfig, PathPattern, PathRedactor,
    DEFAULT_BASE_PATH_MARKER,
};
pub use pattern::{builtin_pattern_names, builtin_patterns, PatternRegistry, SecretPattern};
pub use secret::{
    DetectionResult, RedactionConfig, SecretMatch, SecretRedactor, DEFAULT_REDACTION_MARKER,
    DEFAULT_SUFFIX_LENGTH,
};
