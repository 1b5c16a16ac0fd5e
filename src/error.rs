//! Error types for the shuffle pipeline.

use std::io;
use thiserror::Error;

/// Errors that can occur while shuffling a line stream.
#[derive(Error, Debug)]
pub enum ShuffleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The caller asked for something the input cannot satisfy.
    #[error("{0}")]
    InvalidParameter(String),

    /// The emitted lines differ from the lines read. Always a bug.
    #[error(
        "Internal error: output does not match input ({expected} lines read, {actual} lines written)\n\
         missing from output: {missing:?}\n\
         unexpected in output: {unexpected:?}"
    )]
    InternalConsistency {
        expected: usize,
        actual: usize,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ShuffleError>;

impl ShuffleError {
    /// Build an [`ShuffleError::InternalConsistency`] from two sorted line lists.
    pub fn mismatch(expected: &[String], actual: &[String]) -> Self {
        let mut missing = Vec::new();
        let mut unexpected = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < expected.len() && j < actual.len() {
            match expected[i].cmp(&actual[j]) {
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => {
                    missing.push(expected[i].clone());
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    unexpected.push(actual[j].clone());
                    j += 1;
                }
            }
        }
        missing.extend_from_slice(&expected[i..]);
        unexpected.extend_from_slice(&actual[j..]);

        Self::InternalConsistency {
            expected: expected.len(),
            actual: actual.len(),
            missing,
            unexpected,
        }
    }

    /// True for errors caused by user input rather than a defect.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}
