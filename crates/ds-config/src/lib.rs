//! diag-sanitizer configuration loading and validation.
//!
//! This crate provides:
//! - Typed structs for `sanitizer.json`
//! - Config resolution (explicit path → env → XDG → defaults)
//! - Semantic validation
//! - Config snapshots recording where settings came from

pub mod resolve;
pub mod settings;
pub mod snapshot;
pub mod validate;

pub use resolve::{resolve_config, ConfigPath, ConfigSource};
pub use settings::{
    CustomPathPattern, CustomSecretPattern, PathSettings, PolicySettings, RedactionSettings,
    SanitizerConfig,
};
pub use snapshot::{load, ConfigSnapshot, LoadedConfig};
pub use validate::{validate_config, ValidationError, ValidationResult};

use thiserror::Error;

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Result type for loading and building configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors from loading a config file or building components from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pattern(#[from] ds_redact::RedactionError),
}
