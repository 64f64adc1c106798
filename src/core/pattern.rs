use regex::{Regex, RegexBuilder};

use crate::error::SchemaError;

/// How entry names are compared against schema patterns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    /// The convention of the filesystems usually found on this platform.
    pub fn host() -> Self {
        if cfg!(any(windows, target_os = "macos")) {
            Self::Insensitive
        } else {
            Self::Sensitive
        }
    }
}

#[derive(Clone, Debug)]
enum Matcher {
    Any,
    /// Case-sensitive name without wildcards
    Exact(String),
    /// Globs, and every case-insensitive pattern, so all insensitive
    /// comparisons share the regex case folding
    Glob(Regex),
}

/// A pre-compiled entry name pattern, matched against whole names.
#[derive(Clone, Debug)]
pub struct NamePattern {
    raw: String,
    matcher: Matcher,
}

impl NamePattern {
    pub fn new(pattern: &str, case: CaseSensitivity) -> Result<Self, SchemaError> {
        let has_wildcard = pattern.contains('*') || pattern.contains('?');
        let matcher = if has_wildcard || case == CaseSensitivity::Insensitive {
            let regex = RegexBuilder::new(&glob_to_regex(pattern))
                .case_insensitive(case == CaseSensitivity::Insensitive)
                .dot_matches_new_line(true)
                .build()
                .map_err(|source| SchemaError::InvalidPattern {
                    pattern: pattern.to_owned(),
                    source,
                })?;
            Matcher::Glob(regex)
        } else {
            Matcher::Exact(pattern.to_owned())
        };

        Ok(Self {
            raw: pattern.to_owned(),
            matcher,
        })
    }

    /// Pattern that accepts every name.
    pub fn any() -> Self {
        Self {
            raw: "*".to_owned(),
            matcher: Matcher::Any,
        }
    }

    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Exact(exact) => exact == name,
            Matcher::Glob(regex) => regex.is_match(name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Convert a glob pattern to an anchored regex string.
/// Supports `*` (any sequence) and `?` (single char) wildcards.
fn glob_to_regex(pattern: &str) -> String {
    let mut regex_pattern = String::with_capacity(pattern.len() * 2 + 2);
    regex_pattern.push('^');

    for c in pattern.chars() {
        match c {
            '*' => regex_pattern.push_str(".*"),
            '?' => regex_pattern.push('.'),
            _ => regex_pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    regex_pattern.push('$');
    regex_pattern
}
