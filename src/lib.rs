//! shuffle-lines: category-aware line shuffling
//!
//! This library shuffles the lines of a text stream so that lines of the same
//! category end up spread apart, while every input line appears exactly once
//! in the output.
//!
//! # Pipeline
//!
//! - **Classify**: each line goes to the bucket of the first matching pattern
//! - **Segment**: the stream may be split once, after a configured phrase
//! - **Interleave**: buckets are shuffled and merged in a fair random order
//! - **Verify**: the written lines are checked against the lines read
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use shuffle_lines::{LineSet, PatternSet};
//!
//! let patterns = PatternSet::new(&[r"^\d", r"^[a-z]"]).unwrap();
//! let mut set = LineSet::new(patterns);
//! for line in ["1\n", "2\n", "3\n", "a\n", "b\n"] {
//!     set.add_line(line);
//! }
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! set.shuffle(&mut rng);
//! assert_eq!(set.render().lines().count(), 5);
//! ```

pub mod checker;
pub mod classify;
pub mod commands;
pub mod config;
pub mod error;
pub mod interleave;
pub mod line_set;
pub mod lines;
pub mod parser;
pub mod writer;

// Re-export commonly used types
pub use checker::{LineChecker, NullLineChecker, TweetChecker};
pub use classify::{classify, PatternSet};
pub use commands::{ShuffleCommand, ShuffleStats};
pub use config::ShuffleConfig;
pub use error::{Result, ShuffleError};
pub use interleave::{interleave, Interleaver};
pub use line_set::LineSet;
pub use parser::{LineSetParser, ParsedInput};
pub use writer::SegmentWriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::checker::{LineChecker, NullLineChecker, TweetChecker};
    pub use crate::classify::PatternSet;
    pub use crate::commands::ShuffleCommand;
    pub use crate::config::ShuffleConfig;
    pub use crate::interleave::Interleaver;
    pub use crate::line_set::LineSet;
    pub use crate::parser::LineSetParser;
}
