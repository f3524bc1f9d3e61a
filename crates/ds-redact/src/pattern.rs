//! Secret pattern definitions and the ordered pattern registry.
//!
//! Patterns are scanned in list order. A more specific pattern placed earlier
//! consumes its match before broader patterns run, so reordering the list
//! changes behavior.

use crate::error::{RedactionError, Result};
use crate::matcher::Matcher;
use once_cell::sync::Lazy;

/// A named secret detection rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretPattern {
    /// Rule name reported by detection.
    pub name: String,
    /// Compiled multi-match matcher.
    pub matcher: Matcher,
    /// Human-readable description.
    pub description: Option<String>,
}

impl SecretPattern {
    /// Compile a new pattern.
    ///
    /// This is the only place in the redaction pipeline that can fail.
    pub fn new(name: impl Into<String>, regex: &str) -> Result<Self> {
        let name = name.into();
        let matcher = Matcher::new(regex).map_err(|e| RedactionError::pattern(name.clone(), e))?;
        Ok(Self {
            name,
            matcher,
            description: None,
        })
    }

    /// Build a pattern around an existing matcher.
    pub fn from_matcher(name: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            name: name.into(),
            matcher,
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

struct BuiltinDef {
    name: &'static str,
    regex: &'static str,
    description: &'static str,
}

// Order is specific-before-generic.
static BUILTIN_DEFS: &[BuiltinDef] = &[
    BuiltinDef {
        name: "private_key",
        regex: r"-----BEGIN[A-Z ]*PRIVATE KEY-----(?:[\s\S]*?-----END[A-Z ]*PRIVATE KEY-----)?",
        description: "PEM private key block",
    },
    BuiltinDef {
        name: "jwt",
        regex: r"\beyJ[A-Za-z0-9_-]+\.eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+",
        description: "Three-segment JSON Web Token",
    },
    BuiltinDef {
        name: "connection_string",
        regex: r#"\b[a-zA-Z][a-zA-Z0-9+.-]*://[^\s:/@]+:[^\s@/]+@[^\s/?#)'"]+"#,
        description: "URL with embedded user:password credentials",
    },
    BuiltinDef {
        name: "bearer_token",
        regex: r"(?i)\bbearer\s+[A-Za-z0-9._~+/-]{8,}=*",
        description: "Bearer authorization header value",
    },
    BuiltinDef {
        name: "aws_access_key",
        regex: r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b",
        description: "AWS access key id",
    },
    BuiltinDef {
        name: "env_secret",
        regex: r#"\b[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*_(?:KEY|TOKEN|SECRET|PASSWORD|PASSWD|PWD|CREDENTIALS?)\s*=\s*[^\s'"),;]+"#,
        description: "Upper-snake-case secret environment variable assignment",
    },
    BuiltinDef {
        name: "api_key_assignment",
        regex: r#"(?i)\b(?:api[_-]?key|access[_-]?token|auth[_-]?token|refresh[_-]?token|client[_-]?secret|secret[_-]?key|token)\s*[:=]\s*["']?[A-Za-z0-9_.~+/-]{8,}={0,2}["']?"#,
        description: "API key or token assignment",
    },
    BuiltinDef {
        name: "password_assignment",
        regex: r#"(?i)\b(?:password|passwd|pwd|secret|credentials?)\s*[:=]\s*["']?[^\s"',;)]+["']?"#,
        description: "Password, secret or credential assignment",
    },
    BuiltinDef {
        name: "generic_token",
        regex: r"\b[A-Za-z0-9+/]{40}(?:={1,2}|\b)",
        description: "Fixed-length base64-like token",
    },
];

static BUILTIN_PATTERNS: Lazy<Vec<SecretPattern>> = Lazy::new(|| {
    BUILTIN_DEFS
        .iter()
        .map(|def| {
            SecretPattern::new(def.name, def.regex)
                .unwrap()
                .with_description(def.description)
        })
        .collect()
});

/// Names of the built-in patterns, in scan order.
pub fn builtin_pattern_names() -> Vec<&'static str> {
    BUILTIN_DEFS.iter().map(|def| def.name).collect()
}

/// A fresh copy of the built-in patterns, in scan order.
pub fn builtin_patterns() -> Vec<SecretPattern> {
    BUILTIN_PATTERNS.clone()
}

/// Ordered list of secret patterns.
///
/// Readers only ever get copies, so holding a listing never pins or
/// exposes the live registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRegistry {
    patterns: Vec<SecretPattern>,
}

impl PatternRegistry {
    /// Create a registry seeded with the built-in patterns.
    pub fn new() -> Self {
        Self {
            patterns: builtin_patterns(),
        }
    }

    /// Create a registry with no patterns.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Copy of every pattern, in scan order.
    pub fn list(&self) -> Vec<SecretPattern> {
        self.patterns.clone()
    }

    /// Pattern names, in scan order.
    pub fn names(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.name.clone()).collect()
    }

    /// Append a pattern. Duplicate names are allowed.
    pub fn add(&mut self, pattern: SecretPattern) {
        self.patterns.push(pattern);
    }

    /// Append several patterns, preserving their order.
    pub fn extend<I: IntoIterator<Item = SecretPattern>>(&mut self, patterns: I) {
        self.patterns.extend(patterns);
    }

    /// Remove the first pattern called `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.patterns.iter().position(|p| p.name == name) {
            Some(idx) => {
                self.patterns.remove(idx);
                true
            }
            None => false,
        }
    }

    /// First pattern called `name`.
    pub fn get(&self, name: &str) -> Option<&SecretPattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, SecretPattern> {
        self.patterns.iter()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}
