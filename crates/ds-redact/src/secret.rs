//! Secret redaction over free text.
//!
//! Patterns run one after another in registry order, each making a single
//! pass over the original text. A match that starts inside a span an earlier
//! pattern claimed is skipped; a match that starts in unclaimed text takes
//! over every claimed span it overlaps. Markers are substituted only after
//! all patterns ran, so replacement text is never rescanned.

use crate::pattern::{PatternRegistry, SecretPattern};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default marker substituted for every secret match.
pub const DEFAULT_REDACTION_MARKER: &str = "[REDACTED]";

/// Default number of trailing characters kept when partial preservation is on.
pub const DEFAULT_SUFFIX_LENGTH: usize = 4;

/// Secret redaction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionConfig {
    /// Master switch. Disabled redaction is the identity function.
    pub enabled: bool,
    /// Text substituted for each match.
    pub redaction_marker: String,
    /// Keep the last `suffix_length` characters of each match after the marker.
    pub preserve_partial_suffix: bool,
    /// Number of trailing characters to keep.
    pub suffix_length: usize,
    /// Caller patterns, scanned after the built-ins in this order.
    pub custom_patterns: Vec<SecretPattern>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            redaction_marker: DEFAULT_REDACTION_MARKER.to_string(),
            preserve_partial_suffix: false,
            suffix_length: DEFAULT_SUFFIX_LENGTH,
            custom_patterns: Vec::new(),
        }
    }
}

/// A single detected secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretMatch {
    /// Name of the pattern that claimed this match.
    pub name: String,
    /// The raw matched text. Treat as sensitive.
    pub matched_value: String,
    /// Byte offset of the match in the scanned input.
    pub offset: usize,
}

/// Result of a read-only secret scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether anything matched.
    pub found: bool,
    /// Matches ordered by offset.
    pub matches: Vec<SecretMatch>,
}

/// Applies an ordered pattern registry to text.
#[derive(Debug, Clone)]
pub struct SecretRedactor {
    config: RedactionConfig,
    registry: PatternRegistry,
}

impl SecretRedactor {
    /// Create a redactor scanning the built-ins followed by `config.custom_patterns`.
    pub fn new(config: RedactionConfig) -> Self {
        Self::with_registry(config, PatternRegistry::new())
    }

    /// Create a redactor over an explicit base registry. Custom patterns from
    /// `config` are appended after it.
    pub fn with_registry(config: RedactionConfig, mut registry: PatternRegistry) -> Self {
        registry.extend(config.custom_patterns.iter().cloned());
        trace!(
            patterns = registry.len(),
            enabled = config.enabled,
            "secret redactor constructed"
        );
        Self { config, registry }
    }

    /// Current settings.
    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    /// Copy of the effective pattern list, in scan order.
    pub fn patterns(&self) -> Vec<SecretPattern> {
        self.registry.list()
    }

    /// Append a pattern to the end of the scan order.
    pub fn add_pattern(&mut self, pattern: SecretPattern) {
        self.registry.add(pattern);
    }

    /// Remove the first pattern called `name`.
    pub fn remove_pattern(&mut self, name: &str) -> bool {
        self.registry.remove(name)
    }

    /// Replace every secret in `text` with the marker.
    pub fn redact(&self, text: &str) -> String {
        if !self.config.enabled || text.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for claim in self.scan(text) {
            output.push_str(&text[cursor..claim.start]);
            output.push_str(&self.mask(&text[claim.start..claim.end]));
            cursor = claim.end;
        }
        output.push_str(&text[cursor..]);
        output
    }

    /// Scan `text` without modifying it.
    ///
    /// Reports exactly the spans [`redact`](Self::redact) would replace,
    /// ordered by offset.
    pub fn detect(&self, text: &str) -> DetectionResult {
        if !self.config.enabled || text.is_empty() {
            return DetectionResult::default();
        }

        let matches: Vec<SecretMatch> = self
            .scan(text)
            .into_iter()
            .map(|claim| SecretMatch {
                name: claim.pattern.name.clone(),
                matched_value: text[claim.start..claim.end].to_string(),
                offset: claim.start,
            })
            .collect();

        DetectionResult {
            found: !matches.is_empty(),
            matches,
        }
    }

    /// Whether any pattern matches `text`.
    pub fn contains_secrets(&self, text: &str) -> bool {
        self.detect(text).found
    }

    /// Distinct pattern names detected in `text`, in order of first occurrence.
    pub fn detect_types(&self, text: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for m in self.detect(text).matches {
            if !names.contains(&m.name) {
                names.push(m.name);
            }
        }
        names
    }

    fn mask(&self, matched: &str) -> String {
        let keep = self.config.suffix_length;
        let len = matched.chars().count();

        if self.config.preserve_partial_suffix && len > keep {
            let suffix: String = matched.chars().skip(len - keep).collect();
            format!("{}...{}", self.config.redaction_marker, suffix)
        } else {
            self.config.redaction_marker.clone()
        }
    }
}

/// A span of the input owned by one pattern.
#[derive(Debug)]
struct Claim<'p> {
    start: usize,
    end: usize,
    pattern: &'p SecretPattern,
}

impl SecretRedactor {
    /// Claimed spans of `text`, sorted and disjoint.
    ///
    /// Patterns run in registry order over the original text. A match
    /// starting inside an existing claim belongs to that claim and is
    /// skipped. A match starting in unclaimed text absorbs every claim it
    /// overlaps, so an assignment keeps its whole value even when a token
    /// pattern already claimed part of it.
    fn scan(&self, text: &str) -> Vec<Claim<'_>> {
        let mut claims: Vec<Claim<'_>> = Vec::new();

        for pattern in self.registry.iter() {
            let mut pos = 0;
            let mut count = 0usize;

            while pos <= text.len() {
                let Some(span) = pattern.matcher.find_at(text, pos) else {
                    break;
                };

                // Zero-width matches carry nothing to redact.
                if span.start == span.end {
                    match text[span.end..].chars().next() {
                        Some(c) => pos = span.end + c.len_utf8(),
                        None => break,
                    }
                    continue;
                }

                if let Some(owner) = claims
                    .iter()
                    .find(|c| c.start <= span.start && span.start < c.end)
                {
                    pos = owner.end;
                    continue;
                }

                let mut end = span.end;
                claims.retain(|c| {
                    let overlaps = c.start < span.end && span.start < c.end;
                    if overlaps {
                        end = end.max(c.end);
                    }
                    !overlaps
                });
                let idx = claims.partition_point(|c| c.start < span.start);
                claims.insert(
                    idx,
                    Claim {
                        start: span.start,
                        end,
                        pattern,
                    },
                );

                pos = end;
                count += 1;
            }

            if count > 0 {
                trace!(pattern = %pattern.name, count, "secret pattern matched");
            }
        }

        claims
    }
}

impl Default for SecretRedactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}
