//! Command implementations for shuffle-lines.

pub mod shuffle;

pub use shuffle::{check_input, ShuffleCommand, ShuffleStats};
