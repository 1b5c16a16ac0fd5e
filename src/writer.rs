//! Emitting segments and verifying the round trip.

use crate::error::{Result, ShuffleError};
use crate::line_set::LineSet;
use crate::lines::{read_lines, text_lines};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a segment queue, most recently created segment first.
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentWriter;

impl SegmentWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write every segment's rendered text to `output` and return what was written.
    pub fn write<W: Write>(&self, segments: &[LineSet], output: &mut W) -> Result<String> {
        let mut buf_output = BufWriter::with_capacity(256 * 1024, output);
        let mut written = String::new();

        for segment in segments.iter().rev() {
            let text = segment.render();
            buf_output.write_all(text.as_bytes())?;
            written.push_str(text);
        }

        buf_output.flush()?;
        Ok(written)
    }
}

/// Check that `written` holds exactly the lines in `lines_read` (sorted).
pub fn verify_round_trip(lines_read: &[String], written: &str) -> Result<()> {
    let mut lines = text_lines(written);
    lines.sort_unstable();
    verify_sorted_lines(lines_read, &lines)
}

/// Re-read a written file and check it against `lines_read` (sorted).
pub fn verify_file<P: AsRef<Path>>(lines_read: &[String], path: P) -> Result<()> {
    let file = File::open(path)?;
    let mut lines = read_lines(file)?;
    lines.sort_unstable();
    verify_sorted_lines(lines_read, &lines)
}

fn verify_sorted_lines(expected: &[String], actual: &[String]) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    let err = ShuffleError::mismatch(expected, actual);
    log::error!("round-trip verification failed: {err}");
    Err(err)
}
