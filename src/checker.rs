//! Per-line content checks.
//!
//! Checkers run on every input line for their side effects only. They never
//! change how a line is classified or where it ends up in the output.

use regex::Regex;
use std::io::Write;

/// Hashtag prefixes that are not reported by [`TweetChecker`].
pub const KNOWN_HASHTAGS: &[&str] = &[
    "define",
    "include",
    "if",
    "endif",
    "pragma",
    "やめるのだフェネックで学ぶ",
    "けものフレンズ",
    "はシャープ",
    "はハッシュタグ",
    "の後はコメント",
    "newgame",
    "imas_cg",
];

/// Inspects one line at a time.
pub trait LineChecker {
    /// Check a line. Returns true if anything was reported.
    fn check(&mut self, line: &str) -> bool;
}

/// Checker that accepts everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLineChecker;

impl LineChecker for NullLineChecker {
    fn check(&mut self, _line: &str) -> bool {
        false
    }
}

/// Reports mentions and unknown hashtags in short messages.
#[derive(Debug)]
pub struct TweetChecker<W: Write> {
    out: W,
    mention: Regex,
    hashtag: Regex,
    known_tags: Vec<String>,
}

impl<W: Write> TweetChecker<W> {
    /// Create a checker that writes findings to `out`.
    pub fn new(out: W) -> Self {
        Self::with_known_tags(out, KNOWN_HASHTAGS)
    }

    /// Create a checker with a custom list of accepted hashtag prefixes.
    pub fn with_known_tags<S: AsRef<str>>(out: W, known_tags: &[S]) -> Self {
        Self {
            out,
            mention: Regex::new(r"(\A|\s)@[0-9a-zA-Z]+(\z|\s)").expect("mention pattern is valid"),
            hashtag: Regex::new(r"(\A|\s)#(\S+)").expect("hashtag pattern is valid"),
            known_tags: known_tags.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Consume the checker and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn check_mention(&mut self, line: &str) -> bool {
        if !self.mention.is_match(line) {
            return false;
        }
        report(&mut self.out, format_args!("Mention(s) found in {line}"));
        true
    }

    fn check_hashtag(&mut self, line: &str) -> bool {
        let unknown: Vec<String> = self
            .hashtag
            .captures_iter(line)
            .filter_map(|caps| caps.get(2))
            .map(|tag| tag.as_str())
            .filter(|tag| !self.known_tags.iter().any(|known| tag.starts_with(known.as_str())))
            .map(|tag| format!("#{tag}"))
            .collect();

        if unknown.is_empty() {
            return false;
        }
        report(
            &mut self.out,
            format_args!("Unknown tag(s) {} found", unknown.join(", ")),
        );
        true
    }
}

impl<W: Write> LineChecker for TweetChecker<W> {
    fn check(&mut self, line: &str) -> bool {
        let line = line.trim_end_matches(['\n', '\r']);
        let mention = self.check_mention(line);
        let hashtag = self.check_hashtag(line);
        mention | hashtag
    }
}

/// Findings are advisory; a failing sink must not abort the shuffle.
fn report<W: Write>(out: &mut W, args: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{args}") {
        log::warn!("failed to write checker report: {e}");
    }
}
