//! Filesystem path redaction.
//!
//! Three phases, each fully applied before the next:
//! 1. Base paths (caller-supplied or auto-detected), replaced literally.
//! 2. Custom path patterns, in caller order.
//! 3. System patterns: home directories, temp directories, dependency
//!    directories and per-process paths.

use crate::error::{RedactionError, Result};
use crate::matcher::Matcher;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Default marker substituted for base paths.
pub const DEFAULT_BASE_PATH_MARKER: &str = "[BASE_PATH]";

/// A path rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    /// Compiled multi-match matcher.
    pub matcher: Matcher,
    /// Replacement template; `$1` / `${name}` expand capture groups.
    pub replacement: String,
}

impl PathPattern {
    /// Compile a path rule.
    pub fn new(regex: &str, replacement: impl Into<String>) -> Result<Self> {
        let matcher = Matcher::new(regex).map_err(|e| RedactionError::pattern(regex, e))?;
        Ok(Self {
            matcher,
            replacement: replacement.into(),
        })
    }
}

/// Path redaction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// Master switch. Disabled path redaction is the identity function.
    pub enabled: bool,
    /// Literal prefixes replaced by `base_path_marker`.
    pub base_paths: BTreeSet<String>,
    /// Text substituted for each base path occurrence.
    pub base_path_marker: String,
    /// Detect home and working directory when `base_paths` is empty.
    pub auto_detect_base_paths: bool,
    /// Apply the built-in system path patterns.
    pub apply_system_paths: bool,
    /// Caller patterns, applied after base paths and before system patterns.
    pub custom_patterns: Vec<PathPattern>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_paths: BTreeSet::new(),
            base_path_marker: DEFAULT_BASE_PATH_MARKER.to_string(),
            auto_detect_base_paths: true,
            apply_system_paths: true,
            custom_patterns: Vec::new(),
        }
    }
}

static SYSTEM_PATTERNS: Lazy<Vec<PathPattern>> = Lazy::new(|| {
    [
        // Home directories
        (r"/Users/[^/\s]+", "/Users/[USER]"),
        (r"/home/[^/\s]+", "/home/[USER]"),
        (r"(?i)\b([A-Z]):\\Users\\[^\\\s]+", r"${1}:\Users\[USER]"),
        // Temp directories
        (r"(?:/private)?/var/folders/[^/\s]+/[^/\s]+/T", "[TMP]"),
        (r"(?:/var)?/tmp/[^/\s:'\x22]+", "[TMP]"),
        (r"(?i)(?:\b[A-Z]:\\Users\\[^\\\s]+)?\\AppData\\Local\\Temp", "[TMP]"),
        // Dependency directories
        (r"(?:[^\s'\x22()]*[/\\])?node_modules[/\\]", "[DEPS]/"),
        (r"(?:[^\s'\x22()]*[/\\])?(?:site|dist)-packages[/\\]", "[DEPS]/"),
        (
            r"(?:[^\s'\x22()]*[/\\])?\.cargo[/\\]registry[/\\]src[/\\][^/\\\s]+[/\\]",
            "[DEPS]/",
        ),
        // Process-id paths
        (r"/proc/\d+", "/proc/[PID]"),
    ]
    .into_iter()
    .map(|(regex, replacement)| PathPattern::new(regex, replacement).unwrap())
    .collect()
});

static PATH_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:^|[\s'"(=,\[])(?:~|\.{1,2})?/[\w.@-]+/|(?:^|[\s'"(=,\[])~[/\\]|\b[A-Za-z]:[\\/]|\\\\[\w.-]+\\"#,
    )
    .unwrap()
});

/// Rewrites filesystem paths in free text.
#[derive(Debug, Clone)]
pub struct PathRedactor {
    config: PathConfig,
    /// Literal matchers for base paths, longest path first.
    base_matchers: Vec<Matcher>,
}

impl PathRedactor {
    /// Create a path redactor. When `config.base_paths` is empty and
    /// auto-detection is on, the home and working directories are added.
    pub fn new(mut config: PathConfig) -> Self {
        if config.base_paths.is_empty() && config.auto_detect_base_paths {
            config.base_paths = detect_base_paths();
            debug!(count = config.base_paths.len(), "auto-detected base paths");
        }

        let mut ordered: Vec<&String> = config
            .base_paths
            .iter()
            .filter(|p| !p.is_empty())
            .collect();
        // Nested paths must be replaced before their parents.
        ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let base_matchers = ordered
            .into_iter()
            .filter_map(|path| match Matcher::literal(path) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    warn!(error = %e, "skipping base path that cannot be compiled");
                    None
                }
            })
            .collect();

        Self {
            config,
            base_matchers,
        }
    }

    /// Current settings, including any auto-detected base paths.
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Effective base paths.
    pub fn base_paths(&self) -> &BTreeSet<String> {
        &self.config.base_paths
    }

    /// Redact filesystem paths in `text`.
    pub fn redact(&self, text: &str) -> String {
        if !self.config.enabled || text.is_empty() {
            return text.to_string();
        }

        let mut result = text.to_string();

        for matcher in &self.base_matchers {
            result = matcher
                .replace_all_literal(&result, &self.config.base_path_marker)
                .into_owned();
        }

        for pattern in &self.config.custom_patterns {
            result = pattern
                .matcher
                .replace_all(&result, &pattern.replacement)
                .into_owned();
        }

        if self.config.apply_system_paths {
            for pattern in SYSTEM_PATTERNS.iter() {
                result = pattern
                    .matcher
                    .replace_all(&result, &pattern.replacement)
                    .into_owned();
            }
        }

        trace!(changed = result != text, "path redaction applied");
        result
    }

    /// Cheap structural check for path-shaped substrings.
    ///
    /// Advisory only: independent of the redaction patterns, with both false
    /// positives and false negatives.
    pub fn contains_paths(&self, text: &str) -> bool {
        contains_paths(text)
    }
}

impl Default for PathRedactor {
    fn default() -> Self {
        Self::new(PathConfig::default())
    }
}

/// Cheap structural check for path-shaped substrings. See
/// [`PathRedactor::contains_paths`].
pub fn contains_paths(text: &str) -> bool {
    !text.is_empty() && PATH_SHAPE.is_match(text)
}

/// Home directory plus the working directory, skipping filesystem roots.
pub fn detect_base_paths() -> BTreeSet<String> {
    let mut paths = BTreeSet::new();

    if let Some(home) = home_dir_from_env() {
        if !is_root(Path::new(&home)) {
            paths.insert(home);
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !is_root(&cwd) {
            paths.insert(cwd.to_string_lossy().into_owned());
        }
    }

    paths
}

#[cfg(windows)]
fn home_dir_from_env() -> Option<String> {
    std::env::var("USERPROFILE")
        .ok()
        .or_else(|| std::env::var("HOME").ok())
        .filter(|h| !h.is_empty())
}

#[cfg(not(windows))]
fn home_dir_from_env() -> Option<String> {
    std::env::var("HOME").ok().filter(|h| !h.is_empty())
}

fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}
