//! Loaded configuration plus a record of where it came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

use crate::resolve::{resolve_config, ConfigPath};
use crate::settings::SanitizerConfig;
use crate::validate::{validate_config, ValidationError};

/// Provenance of the active configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When the configuration was loaded.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Source of the configuration.
    pub source: String,

    /// Path the configuration was loaded from.
    #[serde(default)]
    pub path: Option<String>,

    /// SHA-256 hash of the file content.
    #[serde(default)]
    pub content_hash: Option<String>,
}

impl ConfigSnapshot {
    pub fn new(config: &SanitizerConfig, resolved: &ConfigPath, content: Option<&str>) -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            source: resolved.source.to_string(),
            path: resolved
                .path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            content_hash: content.map(hash_content),
        }
    }
}

/// A validated configuration and its snapshot.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SanitizerConfig,
    pub snapshot: ConfigSnapshot,
}

/// Resolve, read and validate the configuration.
///
/// With no file found, defaults are returned with a `builtin default` source.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ValidationError> {
    let resolved = resolve_config(explicit);

    let (config, content) = match &resolved.path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            (SanitizerConfig::parse_json(&content)?, Some(content))
        }
        None => (SanitizerConfig::default(), None),
    };

    validate_config(&config)?;

    let snapshot = ConfigSnapshot::new(&config, &resolved, content.as_deref());
    info!(
        source = %snapshot.source,
        hash = snapshot.content_hash.as_deref().unwrap_or("none"),
        "loaded sanitizer config"
    );

    Ok(LoadedConfig { config, snapshot })
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ConfigSource;
    use std::path::PathBuf;

    #[test]
    fn test_hash_is_stable_sha256() {
        assert_eq!(
            hash_content(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(hash_content("{}"), hash_content("{}"));
        assert_ne!(hash_content("{}"), hash_content("{ }"));
    }

    #[test]
    fn test_snapshot_records_source() {
        let resolved = ConfigPath {
            path: Some(PathBuf::from("/etc/sanitizer.json")),
            source: ConfigSource::Explicit,
        };
        let snapshot = ConfigSnapshot::new(&SanitizerConfig::default(), &resolved, Some("{}"));
        assert_eq!(snapshot.source, "explicit path");
        assert_eq!(snapshot.path.as_deref(), Some("/etc/sanitizer.json"));
        assert_eq!(snapshot.content_hash, Some(hash_content("{}")));
        assert_eq!(snapshot.schema_version, crate::CONFIG_SCHEMA_VERSION);
    }

    #[test]
    fn test_default_snapshot_has_no_hash() {
        let snapshot =
            ConfigSnapshot::new(&SanitizerConfig::default(), &ConfigPath::default(), None);
        assert_eq!(snapshot.source, "builtin default");
        assert!(snapshot.path.is_none());
        assert!(snapshot.content_hash.is_none());
    }
}
