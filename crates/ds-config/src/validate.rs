//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::settings::SanitizerConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest suffix a redacted value may keep.
pub const MAX_SUFFIX_LENGTH: usize = 64;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a configuration semantically. Regexes are checked later, when
/// components are built.
pub fn validate_config(config: &SanitizerConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    let redaction = &config.redaction;
    if redaction.marker.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "redaction.marker".to_string(),
            message: "Must not be empty".to_string(),
        });
    }

    if redaction.suffix_length > MAX_SUFFIX_LENGTH {
        return Err(ValidationError::InvalidValue {
            field: "redaction.suffix_length".to_string(),
            message: format!(
                "Must be at most {}, got {}",
                MAX_SUFFIX_LENGTH, redaction.suffix_length
            ),
        });
    }

    for (idx, pattern) in redaction.custom_patterns.iter().enumerate() {
        if pattern.name.trim().is_empty() {
            return Err(ValidationError::MissingField(format!(
                "redaction.custom_patterns[{}].name",
                idx
            )));
        }
        if pattern.regex.is_empty() {
            return Err(ValidationError::MissingField(format!(
                "redaction.custom_patterns[{}].regex",
                idx
            )));
        }
    }

    if let Some(name) = redaction.disabled_patterns.iter().find(|n| n.trim().is_empty()) {
        return Err(ValidationError::InvalidValue {
            field: "redaction.disabled_patterns".to_string(),
            message: format!("Pattern names must not be empty, got {:?}", name),
        });
    }

    let paths = &config.paths;
    if paths.base_path_marker.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "paths.base_path_marker".to_string(),
            message: "Must not be empty".to_string(),
        });
    }

    for (idx, pattern) in paths.custom_patterns.iter().enumerate() {
        if pattern.regex.is_empty() {
            return Err(ValidationError::MissingField(format!(
                "paths.custom_patterns[{}].regex",
                idx
            )));
        }
    }

    if config.policy.max_external_length == 0 {
        return Err(ValidationError::InvalidValue {
            field: "policy.max_external_length".to_string(),
            message: "Must be positive, got 0".to_string(),
        });
    }

    let production = config.policy.environment.is_some_and(|e| e.is_production());
    if production && !config.policy.enabled && !config.redaction.enabled {
        return Err(ValidationError::SemanticError(
            "Production with both sanitization and redaction disabled exposes raw messages"
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CustomSecretPattern;
    use ds_core::EnvironmentMode;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SanitizerConfig::default()).is_ok());
    }

    #[test]
    fn test_version_mismatch() {
        let config = SanitizerConfig {
            schema_version: "0.1".to_string(),
            ..SanitizerConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.code(), 66);
    }

    #[test]
    fn test_empty_marker_rejected() {
        let mut config = SanitizerConfig::default();
        config.redaction.marker.clear();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "redaction.marker"));
    }

    #[test]
    fn test_suffix_length_bound() {
        let mut config = SanitizerConfig::default();
        config.redaction.suffix_length = MAX_SUFFIX_LENGTH;
        assert!(validate_config(&config).is_ok());
        config.redaction.suffix_length = MAX_SUFFIX_LENGTH + 1;
        assert_eq!(validate_config(&config).unwrap_err().code(), 65);
    }

    #[test]
    fn test_unnamed_custom_pattern_rejected() {
        let mut config = SanitizerConfig::default();
        config.redaction.custom_patterns.push(CustomSecretPattern {
            name: " ".to_string(),
            regex: "x".to_string(),
            description: None,
        });
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.code(), 64);
        assert!(err.to_string().contains("custom_patterns[0].name"));
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let mut config = SanitizerConfig::default();
        config.policy.max_external_length = 0;
        assert_eq!(validate_config(&config).unwrap_err().code(), 65);
    }

    #[test]
    fn test_fully_disabled_production_rejected() {
        let mut config = SanitizerConfig::default();
        config.policy.environment = Some(EnvironmentMode::Production);
        config.policy.enabled = false;
        assert!(validate_config(&config).is_ok());

        config.redaction.enabled = false;
        assert_eq!(validate_config(&config).unwrap_err().code(), 63);
    }
}
