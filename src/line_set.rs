//! A segment of classified lines.

use crate::classify::PatternSet;
use crate::interleave::Interleaver;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;

/// Lines of one contiguous run of input, grouped into buckets.
///
/// Bucket `i < patterns.len()` holds lines matched by pattern `i`; the last
/// bucket holds lines no pattern matched. Each line keeps its terminator.
#[derive(Debug, Clone)]
pub struct LineSet {
    patterns: PatternSet,
    buckets: Vec<Vec<String>>,
    rendered: String,
}

impl LineSet {
    /// Create an empty segment with one bucket per pattern plus a catch-all.
    pub fn new(patterns: PatternSet) -> Self {
        let buckets = vec![Vec::new(); patterns.bucket_count()];
        Self {
            patterns,
            buckets,
            rendered: String::new(),
        }
    }

    /// Classify `line` and append it to its bucket.
    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        let index = self.patterns.classify(&line);
        self.buckets[index].push(line);
    }

    /// Shuffle every bucket and concatenate them in interleave order.
    ///
    /// The buckets are drained; afterwards [`LineSet::render`] returns the
    /// shuffled text.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut queues: Vec<VecDeque<String>> = self
            .buckets
            .drain(..)
            .map(|mut bucket| {
                bucket.shuffle(&mut *rng);
                VecDeque::from(bucket)
            })
            .collect();

        let sizes: Vec<usize> = queues.iter().map(VecDeque::len).collect();
        let order = Interleaver::new().compute_order(&sizes, rng);

        for index in order {
            if let Some(line) = queues[index].pop_front() {
                self.rendered.push_str(&line);
            }
        }

        // Anything the order did not cover, in bucket order
        for line in queues.into_iter().flatten() {
            self.rendered.push_str(&line);
        }

        self.buckets = vec![Vec::new(); self.patterns.bucket_count()];
    }

    /// Text produced by the last [`LineSet::shuffle`].
    pub fn render(&self) -> &str {
        &self.rendered
    }

    /// Buckets as filled by [`LineSet::add_line`].
    pub fn buckets(&self) -> &[Vec<String>] {
        &self.buckets
    }

    /// Number of lines waiting in buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for LineSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
