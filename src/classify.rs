//! Line classification.
//!
//! A [`PatternSet`] is an ordered list of regular expressions. A line belongs
//! to the bucket of the first pattern it matches, or to the catch-all bucket
//! (index `patterns.len()`) when none match.

use crate::error::Result;
use regex::Regex;

/// Ordered set of match predicates. Earlier patterns take precedence.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile a pattern set from regex sources.
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        let patterns = sources
            .iter()
            .map(|s| Regex::new(s.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Number of patterns (not counting the catch-all).
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of buckets a line set needs for this pattern set.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.patterns.len() + 1
    }

    /// Index of the catch-all bucket.
    #[inline]
    pub fn catch_all(&self) -> usize {
        self.patterns.len()
    }

    /// Bucket index for `line`.
    #[inline]
    pub fn classify(&self, line: &str) -> usize {
        classify(line, &self.patterns)
    }
}

/// Return the index of the first pattern matching `line`, or `patterns.len()`.
///
/// The line terminator is not part of the matched text, so `$` anchors at the
/// end of the line's content.
#[inline]
pub fn classify(line: &str, patterns: &[Regex]) -> usize {
    let text = strip_terminator(line);
    patterns
        .iter()
        .position(|p| p.is_match(text))
        .unwrap_or(patterns.len())
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
