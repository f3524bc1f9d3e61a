//! Configuration resolution and path discovery.
//!
//! Resolution order: explicit path → environment variable → XDG path → defaults.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed explicitly by the caller.
    Explicit,

    /// Set via `DIAG_SANITIZER_CONFIG`.
    Environment,

    /// Found in the XDG/platform config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit path"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// A resolved configuration file, or none when defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPath {
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Environment variable holding a config file path.
pub const ENV_CONFIG_PATH: &str = "DIAG_SANITIZER_CONFIG";

/// Standard config file name.
pub const CONFIG_FILENAME: &str = "sanitizer.json";

/// Application name for XDG directories.
const APP_NAME: &str = "diag_sanitizer";

/// Resolve the configuration file path.
///
/// Resolution order:
/// 1. Explicit path (if provided and present)
/// 2. `DIAG_SANITIZER_CONFIG`
/// 3. XDG config directory (`~/.config/diag_sanitizer/sanitizer.json`)
/// 4. Built-in defaults (None)
pub fn resolve_config(explicit: Option<&Path>) -> ConfigPath {
    if let Some(path) = explicit {
        if path.exists() {
            return found(path.to_path_buf(), ConfigSource::Explicit);
        }
        warn!(path = %path.display(), "explicit config path does not exist");
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
        warn!(path = %path.display(), "{} points to a missing file", ENV_CONFIG_PATH);
    }

    if let Some(path) = xdg_config_file() {
        if path.exists() {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    debug!("no config file found, using defaults");
    ConfigPath::default()
}

fn found(path: PathBuf, source: ConfigSource) -> ConfigPath {
    debug!(path = %path.display(), %source, "resolved config file");
    ConfigPath {
        path: Some(path),
        source,
    }
}

/// XDG config directory for diag_sanitizer.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Expected config file inside the XDG config directory.
pub fn xdg_config_file() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(CONFIG_FILENAME))
}
