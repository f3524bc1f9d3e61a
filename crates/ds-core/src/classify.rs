//! Maps an error to one fixed, information-free message.
//!
//! Resolution order:
//! 1. exact match of the short type name against a static table
//! 2. first keyword group with any keyword present in the lowercased message
//! 3. the internal-error default
//!
//! The original text never contributes to the output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::input::short_type_name;

/// Generic failure categories, each with a fixed user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Timeout,
    RateLimited,
    Authentication,
    PermissionDenied,
    NotFound,
    Network,
    Validation,
    Internal,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 8] = [
        ErrorCategory::Timeout,
        ErrorCategory::RateLimited,
        ErrorCategory::Authentication,
        ErrorCategory::PermissionDenied,
        ErrorCategory::NotFound,
        ErrorCategory::Network,
        ErrorCategory::Validation,
        ErrorCategory::Internal,
    ];

    pub fn generic_message(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "The operation timed out. Please try again.",
            ErrorCategory::RateLimited => "Too many requests. Please wait a moment and try again.",
            ErrorCategory::Authentication => "Authentication failed. Please check your credentials.",
            ErrorCategory::PermissionDenied => "You do not have permission to perform this action.",
            ErrorCategory::NotFound => "The requested resource was not found.",
            ErrorCategory::Network => {
                "A network error occurred. Please check your connection and try again."
            }
            ErrorCategory::Validation => {
                "The request was invalid. Please check your input and try again."
            }
            ErrorCategory::Internal => "An unexpected error occurred. Please try again later.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::PermissionDenied => "permission_denied",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Network => "network",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message used when nothing else matches.
pub const DEFAULT_GENERIC_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Exact short-type-name matches. Includes `std::io::ErrorKind` names so that
/// `ErrorInput::from_io_error` classifies by kind.
static TYPE_TABLE: &[(&str, ErrorCategory)] = &[
    ("TimeoutError", ErrorCategory::Timeout),
    ("Elapsed", ErrorCategory::Timeout),
    ("TimedOut", ErrorCategory::Timeout),
    ("RateLimitError", ErrorCategory::RateLimited),
    ("TooManyRequests", ErrorCategory::RateLimited),
    ("AuthenticationError", ErrorCategory::Authentication),
    ("UnauthorizedError", ErrorCategory::Authentication),
    ("PermissionDenied", ErrorCategory::PermissionDenied),
    ("PermissionError", ErrorCategory::PermissionDenied),
    ("ForbiddenError", ErrorCategory::PermissionDenied),
    ("NotFound", ErrorCategory::NotFound),
    ("NotFoundError", ErrorCategory::NotFound),
    ("ConnectionRefused", ErrorCategory::Network),
    ("ConnectionReset", ErrorCategory::Network),
    ("ConnectionAborted", ErrorCategory::Network),
    ("NotConnected", ErrorCategory::Network),
    ("NetworkError", ErrorCategory::Network),
    ("ValidationError", ErrorCategory::Validation),
    ("InvalidInput", ErrorCategory::Validation),
    ("InvalidData", ErrorCategory::Validation),
    ("ParseIntError", ErrorCategory::Validation),
    ("ParseFloatError", ErrorCategory::Validation),
    ("ParseBoolError", ErrorCategory::Validation),
    ("Utf8Error", ErrorCategory::Validation),
    ("FromUtf8Error", ErrorCategory::Validation),
];

/// Ordered keyword groups; the first group with a hit wins.
static KEYWORD_GROUPS: &[(ErrorCategory, &[&str])] = &[
    (
        ErrorCategory::Timeout,
        &["timed out", "timeout", "deadline exceeded"],
    ),
    (
        ErrorCategory::RateLimited,
        &["rate limit", "too many requests", "throttl", "quota exceeded"],
    ),
    (
        ErrorCategory::Authentication,
        &[
            "unauthorized",
            "unauthenticated",
            "authentication",
            "invalid credentials",
            "invalid token",
            "token expired",
            "expired token",
        ],
    ),
    (
        ErrorCategory::PermissionDenied,
        &["permission denied", "forbidden", "access denied", "not permitted"],
    ),
    (
        ErrorCategory::NotFound,
        &["not found", "no such file", "does not exist"],
    ),
    (
        ErrorCategory::Network,
        &[
            "connection refused",
            "connection reset",
            "econnrefused",
            "econnreset",
            "network",
            "unreachable",
            "dns",
        ],
    ),
    (
        ErrorCategory::Validation,
        &["invalid", "validation", "malformed", "bad request"],
    ),
];

/// Category for an error's type name and message.
pub fn categorize(type_name: &str, message: &str) -> ErrorCategory {
    let short = short_type_name(type_name);
    if let Some((_, category)) = TYPE_TABLE.iter().find(|(name, _)| *name == short) {
        return *category;
    }

    let lowered = message.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(ErrorCategory::Internal)
}

/// Fixed generic message for an error's type name and message.
pub fn classify(type_name: &str, message: &str) -> &'static str {
    categorize(type_name, message).generic_message()
}

/// Every message `classify` can return.
pub fn generic_messages() -> Vec<&'static str> {
    ErrorCategory::ALL
        .iter()
        .map(|c| c.generic_message())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_keyword_scenario() {
        assert_eq!(
            classify("Error", "Request timed out after 5000ms"),
            "The operation timed out. Please try again."
        );
    }

    #[test]
    fn test_type_table_wins_over_keywords() {
        // Message says "not found" but the type is authoritative.
        assert_eq!(
            categorize("RateLimitError", "user not found"),
            ErrorCategory::RateLimited
        );
    }

    #[test]
    fn test_type_name_is_shortened() {
        assert_eq!(
            categorize("core::num::error::ParseIntError", "whatever"),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(
            categorize("Error", "PERMISSION DENIED for /etc/shadow"),
            ErrorCategory::PermissionDenied
        );
    }

    #[test]
    fn test_first_keyword_group_wins() {
        // Both timeout and network keywords present.
        assert_eq!(
            categorize("Error", "network timeout while connecting"),
            ErrorCategory::Timeout
        );
        // "invalid token" is authentication, not validation.
        assert_eq!(
            categorize("Error", "invalid token supplied"),
            ErrorCategory::Authentication
        );
    }

    #[test]
    fn test_unmatched_falls_through_to_default() {
        assert_eq!(classify("Weird", "kaboom"), DEFAULT_GENERIC_MESSAGE);
        assert_eq!(classify("", ""), DEFAULT_GENERIC_MESSAGE);
    }

    #[test]
    fn test_io_kinds() {
        assert_eq!(categorize("TimedOut", ""), ErrorCategory::Timeout);
        assert_eq!(categorize("ConnectionRefused", ""), ErrorCategory::Network);
        assert_eq!(categorize("NotFound", ""), ErrorCategory::NotFound);
    }

    #[test]
    fn test_generic_messages_are_distinct() {
        let messages = generic_messages();
        let mut deduped = messages.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(messages.len(), deduped.len());
        assert!(messages.contains(&DEFAULT_GENERIC_MESSAGE));
    }
}
