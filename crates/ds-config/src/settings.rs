//! Typed representation of `sanitizer.json`.
//!
//! Every field is optional; anything missing takes the same default the
//! runtime types use.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

use ds_core::{EnvironmentMode, SanitizationPolicy, Sanitizer, DEFAULT_MAX_EXTERNAL_LENGTH};
use ds_redact::{
    PathConfig, PathPattern, PathRedactor, PatternRegistry, RedactionConfig, SecretPattern,
    SecretRedactor, DEFAULT_BASE_PATH_MARKER, DEFAULT_REDACTION_MARKER, DEFAULT_SUFFIX_LENGTH,
};

use crate::validate::ValidationError;

/// Root of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub schema_version: String,
    pub redaction: RedactionSettings,
    pub paths: PathSettings,
    pub policy: PolicySettings,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            redaction: RedactionSettings::default(),
            paths: PathSettings::default(),
            policy: PolicySettings::default(),
        }
    }
}

/// Secret redaction section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionSettings {
    pub enabled: bool,
    pub marker: String,
    pub preserve_partial_suffix: bool,
    pub suffix_length: usize,
    /// Scanned after the built-ins, in file order.
    pub custom_patterns: Vec<CustomSecretPattern>,
    /// Built-in pattern names to remove.
    pub disabled_patterns: Vec<String>,
}

impl Default for RedactionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            marker: DEFAULT_REDACTION_MARKER.to_string(),
            preserve_partial_suffix: false,
            suffix_length: DEFAULT_SUFFIX_LENGTH,
            custom_patterns: Vec::new(),
            disabled_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSecretPattern {
    pub name: String,
    pub regex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Path redaction section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub enabled: bool,
    pub base_paths: Vec<String>,
    pub base_path_marker: String,
    pub auto_detect_base_paths: bool,
    pub apply_system_paths: bool,
    pub custom_patterns: Vec<CustomPathPattern>,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_paths: Vec::new(),
            base_path_marker: DEFAULT_BASE_PATH_MARKER.to_string(),
            auto_detect_base_paths: true,
            apply_system_paths: true,
            custom_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPathPattern {
    pub regex: String,
    /// Replacement template; `$1`-style group references are expanded.
    pub replacement: String,
}

/// Sanitization policy section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    pub enabled: bool,
    /// When absent, the mode comes from `DIAG_SANITIZER_ENV`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentMode>,
    pub include_correlation_id: bool,
    pub max_external_length: usize,
    pub strip_stack_in_production: bool,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            environment: None,
            include_correlation_id: true,
            max_external_length: DEFAULT_MAX_EXTERNAL_LENGTH,
            strip_stack_in_production: true,
        }
    }
}

impl SanitizerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Runtime secret redaction settings. Compiles custom patterns.
    pub fn redaction_config(&self) -> crate::Result<RedactionConfig> {
        let custom_patterns = self
            .redaction
            .custom_patterns
            .iter()
            .map(|custom| -> crate::Result<SecretPattern> {
                let pattern = SecretPattern::new(&custom.name, &custom.regex)?;
                Ok(match &custom.description {
                    Some(description) => pattern.with_description(description),
                    None => pattern,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(RedactionConfig {
            enabled: self.redaction.enabled,
            redaction_marker: self.redaction.marker.clone(),
            preserve_partial_suffix: self.redaction.preserve_partial_suffix,
            suffix_length: self.redaction.suffix_length,
            custom_patterns,
        })
    }

    /// Secret redactor with disabled built-ins removed.
    pub fn secret_redactor(&self) -> crate::Result<SecretRedactor> {
        let mut registry = PatternRegistry::new();
        for name in &self.redaction.disabled_patterns {
            if registry.remove(name) {
                debug!(pattern = %name, "disabled built-in pattern");
            } else {
                warn!(pattern = %name, "disabled_patterns names an unknown pattern");
            }
        }
        Ok(SecretRedactor::with_registry(
            self.redaction_config()?,
            registry,
        ))
    }

    /// Runtime path redaction settings. Compiles custom patterns.
    pub fn path_config(&self) -> crate::Result<PathConfig> {
        let custom_patterns = self
            .paths
            .custom_patterns
            .iter()
            .map(|custom| PathPattern::new(&custom.regex, custom.replacement.clone()))
            .collect::<ds_redact::Result<Vec<_>>>()?;

        Ok(PathConfig {
            enabled: self.paths.enabled,
            base_paths: self.paths.base_paths.iter().cloned().collect::<BTreeSet<_>>(),
            base_path_marker: self.paths.base_path_marker.clone(),
            auto_detect_base_paths: self.paths.auto_detect_base_paths,
            apply_system_paths: self.paths.apply_system_paths,
            custom_patterns,
        })
    }

    pub fn path_redactor(&self) -> crate::Result<PathRedactor> {
        Ok(PathRedactor::new(self.path_config()?))
    }

    /// Runtime policy. A missing environment is read from the process
    /// environment now.
    pub fn policy(&self) -> SanitizationPolicy {
        SanitizationPolicy {
            enabled: self.policy.enabled,
            environment: self.policy.environment.unwrap_or_else(EnvironmentMode::from_env),
            include_correlation_id: self.policy.include_correlation_id,
            max_external_length: self.policy.max_external_length,
            strip_stack_in_production: self.policy.strip_stack_in_production,
        }
    }

    /// Sanitizer built from every section.
    pub fn sanitizer(&self) -> crate::Result<Sanitizer> {
        Ok(Sanitizer::with_redactors(
            self.policy(),
            self.secret_redactor()?,
            self.path_redactor()?,
        ))
    }
}
