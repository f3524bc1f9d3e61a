//! Stateless match-all scanning.
//!
//! A scan starts at offset zero unless the caller passes a start offset, and
//! no resume position is carried into the next call, so a single `Matcher`
//! can be reused across inputs and shared between threads.

use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// A single non-overlapping match found by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan<'t> {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    /// The matched text.
    pub text: &'t str,
}

/// Compiled multi-match pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile a regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Build a matcher that matches `text` literally, with every regex
    /// metacharacter escaped.
    pub fn literal(text: &str) -> Result<Self, regex::Error> {
        Self::new(&regex::escape(text))
    }

    /// Wrap an already compiled regex.
    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// All non-overlapping matches in `text`, left to right.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<MatchSpan<'t>> {
        self.regex
            .find_iter(text)
            .map(|m| MatchSpan {
                start: m.start(),
                end: m.end(),
                text: m.as_str(),
            })
            .collect()
    }

    /// First match starting at or after byte `start`. Word boundaries and
    /// anchors still see the text before `start`.
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<MatchSpan<'t>> {
        self.regex.find_at(text, start).map(|m| MatchSpan {
            start: m.start(),
            end: m.end(),
            text: m.as_str(),
        })
    }

    /// Replace every match with `template`, expanding `$1` / `${name}` groups.
    ///
    /// Single pass: text produced by the template is never rescanned.
    pub fn replace_all<'t>(&self, text: &'t str, template: &str) -> Cow<'t, str> {
        self.regex.replace_all(text, template)
    }

    /// Replace every match with `replacement` verbatim; `$` is not special.
    pub fn replace_all_literal<'t>(&self, text: &'t str, replacement: &str) -> Cow<'t, str> {
        self.regex.replace_all(text, NoExpand(replacement))
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Matcher {}
