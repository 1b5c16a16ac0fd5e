//! Shuffle command implementation.
//!
//! Reads the whole input, splits it into segments, shuffles each segment and
//! writes the segments back in reverse order. The output is then checked
//! against the input; a mismatch is reported as an internal error.

use crate::checker::{LineChecker, NullLineChecker, TweetChecker};
use crate::classify::PatternSet;
use crate::config::ShuffleConfig;
use crate::error::{Result, ShuffleError};
use crate::parser::LineSetParser;
use crate::writer::{verify_file, verify_round_trip, SegmentWriter};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

/// Statistics from a shuffle run.
#[derive(Debug, Default, Clone)]
pub struct ShuffleStats {
    pub lines: usize,
    pub segments: usize,
    pub elapsed_secs: f64,
}

impl fmt::Display for ShuffleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lines={}, segments={}, elapsed={:.3}s",
            self.lines, self.segments, self.elapsed_secs
        )
    }
}

/// Shuffle command.
#[derive(Debug, Clone)]
pub struct ShuffleCommand {
    config: ShuffleConfig,
    patterns: PatternSet,
}

impl ShuffleCommand {
    /// Create a command, compiling the configured patterns.
    pub fn new(config: ShuffleConfig) -> Result<Self> {
        let patterns = PatternSet::new(&config.patterns)?;
        Ok(Self { config, patterns })
    }

    fn parser(&self) -> LineSetParser {
        let parser = LineSetParser::new(self.patterns.clone());
        match &self.config.phrase {
            Some(phrase) => parser.with_phrase(phrase.clone()),
            None => parser,
        }
    }

    fn rng(&self) -> SmallRng {
        match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    /// Run against the configured input and output.
    pub fn run(&self) -> Result<ShuffleStats> {
        let input = self.config.input_path();
        let output = self.config.output_path();

        if let Some(input) = input {
            check_input(input, output.map(|p| p.as_path()))?;
        }

        let mut checker: Box<dyn LineChecker> = if self.config.check_tweets {
            Box::new(TweetChecker::new(io::stderr()))
        } else {
            Box::new(NullLineChecker)
        };
        let mut rng = self.rng();

        let (stats, lines_read) = match (input, output) {
            (Some(input), Some(output)) => {
                let reader = File::open(input)?;
                let mut writer = LazyFile::new(output);
                self.execute(reader, &mut writer, checker.as_mut(), &mut rng)?
            }
            (Some(input), None) => {
                let reader = File::open(input)?;
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.execute(reader, &mut handle, checker.as_mut(), &mut rng)?
            }
            (None, Some(output)) => {
                let stdin = io::stdin();
                let mut writer = LazyFile::new(output);
                self.execute(stdin.lock(), &mut writer, checker.as_mut(), &mut rng)?
            }
            (None, None) => {
                let stdin = io::stdin();
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.execute(stdin.lock(), &mut handle, checker.as_mut(), &mut rng)?
            }
        };

        // Files are closed by now; check what actually landed on disk
        if let Some(output) = output {
            verify_file(&lines_read, output)?;
        }

        Ok(stats)
    }

    /// Parse, shuffle, write and verify using explicit streams.
    ///
    /// Nothing is written to `output` if parsing fails.
    pub fn run_streams<R, W, G>(
        &self,
        input: R,
        output: &mut W,
        checker: &mut dyn LineChecker,
        rng: &mut G,
    ) -> Result<ShuffleStats>
    where
        R: Read,
        W: Write,
        G: Rng + ?Sized,
    {
        self.execute(input, output, checker, rng)
            .map(|(stats, _)| stats)
    }

    fn execute<R, W, G>(
        &self,
        input: R,
        output: &mut W,
        checker: &mut dyn LineChecker,
        rng: &mut G,
    ) -> Result<(ShuffleStats, Vec<String>)>
    where
        R: Read,
        W: Write,
        G: Rng + ?Sized,
    {
        let start = Instant::now();

        let mut parsed = self.parser().parse(input, checker)?;
        for segment in &mut parsed.segments {
            segment.shuffle(rng);
        }

        let written = SegmentWriter::new().write(&parsed.segments, output)?;
        verify_round_trip(&parsed.lines_read, &written)?;

        let stats = ShuffleStats {
            lines: parsed.line_count(),
            segments: parsed.segments.len(),
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        log::debug!("shuffle finished: {stats}");
        Ok((stats, parsed.lines_read))
    }
}

/// Reject a missing input file or an output that is the input itself.
pub fn check_input(input: &Path, output: Option<&Path>) -> Result<()> {
    if !input.exists() {
        return Err(ShuffleError::InvalidParameter(format!(
            "{} does not exist.",
            input.display()
        )));
    }

    if let Some(output) = output {
        if is_same_file(input, output) {
            return Err(ShuffleError::InvalidParameter(
                "Input and output files are identical.".to_string(),
            ));
        }
    }

    Ok(())
}

/// True if both paths name the same file, hard links included.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Output file that is only created on first write.
///
/// Keeps an existing output untouched when parsing fails.
struct LazyFile<'a> {
    path: &'a Path,
    file: Option<File>,
}

impl<'a> LazyFile<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, file: None }
    }

    fn file(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::create(self.path)?,
        };
        Ok(self.file.insert(file))
    }
}

impl Write for LazyFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }
}
