//! Environment mode and sanitization policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable selecting the mode for default-constructed policies.
pub const ENVIRONMENT_VAR: &str = "DIAG_SANITIZER_ENV";

/// Default cap on external message length, in characters.
pub const DEFAULT_MAX_EXTERNAL_LENGTH: usize = 200;

/// Deployment environment. Only `Production` hides original messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    Production,
    #[default]
    Development,
    Test,
}

impl EnvironmentMode {
    /// Parse a mode name. `prod` is accepted for production.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(EnvironmentMode::Production),
            "development" | "dev" => Some(EnvironmentMode::Development),
            "test" => Some(EnvironmentMode::Test),
            _ => None,
        }
    }

    /// Mode from `DIAG_SANITIZER_ENV`; unset or unrecognized means development.
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .ok()
            .and_then(|v| Self::parse_str(&v))
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        matches!(self, EnvironmentMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentMode::Production => "production",
            EnvironmentMode::Development => "development",
            EnvironmentMode::Test => "test",
        }
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How errors are turned into external records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizationPolicy {
    /// When false, messages are still secret-redacted but never replaced by
    /// generic text.
    pub enabled: bool,
    pub environment: EnvironmentMode,
    pub include_correlation_id: bool,
    pub max_external_length: usize,
    pub strip_stack_in_production: bool,
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            environment: EnvironmentMode::from_env(),
            include_correlation_id: true,
            max_external_length: DEFAULT_MAX_EXTERNAL_LENGTH,
            strip_stack_in_production: true,
        }
    }
}

impl SanitizationPolicy {
    pub fn with_environment(mut self, environment: EnvironmentMode) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_max_external_length(mut self, max: usize) -> Self {
        self.max_external_length = max;
        self
    }

    /// True when the original message must be replaced by a generic one.
    pub fn uses_generic_messages(&self) -> bool {
        self.enabled && self.environment.is_production()
    }

    /// True when stacks must be dropped from safe errors.
    pub fn strips_stack(&self) -> bool {
        self.strip_stack_in_production && self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str() {
        assert_eq!(
            EnvironmentMode::parse_str("PRODUCTION"),
            Some(EnvironmentMode::Production)
        );
        assert_eq!(
            EnvironmentMode::parse_str(" prod "),
            Some(EnvironmentMode::Production)
        );
        assert_eq!(EnvironmentMode::parse_str("test"), Some(EnvironmentMode::Test));
        assert_eq!(
            EnvironmentMode::parse_str("dev"),
            Some(EnvironmentMode::Development)
        );
        assert_eq!(EnvironmentMode::parse_str("staging"), None);
    }

    #[test]
    fn test_generic_messages_need_enabled_and_production() {
        let policy = SanitizationPolicy::default().with_environment(EnvironmentMode::Production);
        assert!(policy.uses_generic_messages());

        let disabled = SanitizationPolicy {
            enabled: false,
            ..policy.clone()
        };
        assert!(!disabled.uses_generic_messages());

        let dev = policy.with_environment(EnvironmentMode::Development);
        assert!(!dev.uses_generic_messages());
    }

    #[test]
    fn test_strips_stack() {
        let policy = SanitizationPolicy::default().with_environment(EnvironmentMode::Production);
        assert!(policy.strips_stack());
        let keep = SanitizationPolicy {
            strip_stack_in_production: false,
            ..policy
        };
        assert!(!keep.strips_stack());
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: SanitizationPolicy =
            serde_json::from_str(r#"{"environment":"production","max_external_length":80}"#)
                .unwrap();
        assert_eq!(policy.environment, EnvironmentMode::Production);
        assert_eq!(policy.max_external_length, 80);
        assert!(policy.enabled);
        assert!(policy.include_correlation_id);
    }
}
