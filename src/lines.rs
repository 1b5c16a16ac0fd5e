//! Splitting raw input into terminated lines.

use memchr::memchr_iter;
use std::io::{self, Read};

/// Read everything from `reader` and split it into lines.
///
/// Each line keeps its terminator (`\n` or `\r\n`). Invalid UTF-8 sequences
/// are replaced by a single space. A trailing line without a terminator is
/// given the terminator of the line before it, or `\n` for a single line, so
/// the output of such an input is one or two bytes longer than the input. The
/// returned lines hold the terminated form.
pub fn read_lines<R: Read>(mut reader: R) -> io::Result<Vec<String>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(split_lines(&data))
}

/// Split a byte buffer into terminated lines. See [`read_lines`].
pub fn split_lines(data: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;

    for pos in memchr_iter(b'\n', data) {
        lines.push(decode(&data[start..=pos]));
        start = pos + 1;
    }

    if start < data.len() {
        let mut last = decode(&data[start..]);
        let terminator = match lines.last() {
            Some(prev) if prev.ends_with("\r\n") => "\r\n",
            _ => "\n",
        };
        last.push_str(terminator);
        lines.push(last);
    }

    lines
}

/// Decode UTF-8, replacing each invalid sequence with a space.
fn decode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            out.push(' ');
        }
    }
    out
}

/// Split emitted text back into lines, terminators included.
pub fn text_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
