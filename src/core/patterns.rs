//! Extension patterns to hide, e.g. `*.meta`.
//!
//! Loaded once at startup from a plain text file (one glob per line) and
//! never modified afterwards.

use crate::error::{ExhideError, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;

/// Windows shell matching is case-insensitive
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
pub struct ExtensionPattern {
    original: String,
    pattern: Pattern,
}

impl ExtensionPattern {
    pub fn new(pattern_str: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern_str)
            .map_err(|e| ExhideError::pattern(pattern_str, e.msg))?;

        Ok(Self {
            original: pattern_str.to_string(),
            pattern,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Match against a bare file name, never a full path
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches_with(file_name, MATCH_OPTIONS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    patterns: Vec<ExtensionPattern>,
}

impl PatternStore {
    /// Read patterns from `path`. A missing file yields an empty store.
    /// Blank lines are ignored and invalid globs are logged and skipped.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No pattern file at {:?}, nothing will be hidden", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut patterns = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match ExtensionPattern::new(line) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => log::warn!("Skipping pattern: {}", e),
            }
        }

        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtensionPattern> {
        self.patterns.iter()
    }

    /// True if any pattern matches the file name
    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(file_name))
    }
}
