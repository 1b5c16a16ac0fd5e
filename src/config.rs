//! Runtime configuration for a shuffle run.

use std::path::{Path, PathBuf};

/// Patterns used when none are given on the command line.
///
/// Lines opening with the "yameru no da fennec" catch-phrase form one group,
/// lines mentioning the show's title another.
pub const DEFAULT_PATTERNS: &[&str] = &[r"\A\s*やめるのだ\s*フェネック", r"けものフレンズ"];

/// Configuration for [`crate::ShuffleCommand`].
#[derive(Debug, Clone)]
pub struct ShuffleConfig {
    /// Input file; `None` or `-` reads stdin.
    pub input: Option<PathBuf>,
    /// Output file; `None` or `-` writes stdout.
    pub output: Option<PathBuf>,
    /// Split after the first line containing this phrase.
    pub phrase: Option<String>,
    /// Run the tweet checker on every line, reporting to stderr.
    pub check_tweets: bool,
    /// Classification patterns, highest precedence first.
    pub patterns: Vec<String>,
    /// Seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            phrase: None,
            check_tweets: false,
            patterns: DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect(),
            seed: None,
        }
    }
}

impl ShuffleConfig {
    /// Input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| !is_stdio(p))
    }

    /// Output path, or `None` for stdout.
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output.as_ref().filter(|p| !is_stdio(p))
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}
