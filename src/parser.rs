//! Reads an input stream into a queue of segments.

use crate::checker::LineChecker;
use crate::classify::PatternSet;
use crate::error::{Result, ShuffleError};
use crate::line_set::LineSet;
use crate::lines::read_lines;
use std::io::Read;

/// Segments in creation order plus a sorted record of every line read.
#[derive(Debug, Clone)]
pub struct ParsedInput {
    pub segments: Vec<LineSet>,
    pub lines_read: Vec<String>,
}

impl ParsedInput {
    /// Total number of lines read.
    pub fn line_count(&self) -> usize {
        self.lines_read.len()
    }
}

/// Routes lines into segments, splitting at the first line containing a phrase.
#[derive(Debug, Clone)]
pub struct LineSetParser {
    patterns: PatternSet,
    phrase: Option<String>,
}

impl LineSetParser {
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            patterns,
            phrase: None,
        }
    }

    /// Split once, after the first line that contains `phrase`.
    ///
    /// An empty phrase matches the very first line.
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = Some(phrase.into());
        self
    }

    /// Read all of `reader` and build the segment queue.
    pub fn parse<R: Read>(
        &self,
        reader: R,
        checker: &mut dyn LineChecker,
    ) -> Result<ParsedInput> {
        let lines = read_lines(reader)?;
        self.parse_lines(lines, checker)
    }

    /// Build the segment queue from lines that already carry terminators.
    pub fn parse_lines<I>(&self, lines: I, checker: &mut dyn LineChecker) -> Result<ParsedInput>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut segments = vec![LineSet::new(self.patterns.clone())];
        let mut lines_read = Vec::new();
        let mut phrase = self.phrase.as_deref();

        for line in lines {
            let line: String = line.into();
            checker.check(&line);

            let split = phrase.is_some_and(|p| line.contains(p));
            lines_read.push(line.clone());
            if let Some(current) = segments.last_mut() {
                current.add_line(line);
            }

            if split {
                log::debug!(
                    "split phrase found at line {}, starting segment {}",
                    lines_read.len(),
                    segments.len() + 1
                );
                segments.push(LineSet::new(self.patterns.clone()));
                phrase = None;
            }
        }

        if let Some(p) = phrase {
            return Err(ShuffleError::InvalidParameter(format!(
                "Cannot find {p} in the input."
            )));
        }

        lines_read.sort_unstable();
        log::debug!(
            "read {} lines into {} segment(s)",
            lines_read.len(),
            segments.len()
        );

        Ok(ParsedInput {
            segments,
            lines_read,
        })
    }
}
