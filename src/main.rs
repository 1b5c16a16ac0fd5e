//! shuffle-lines: shuffle the lines of a text stream.
//!
//! Usage: shuffle-lines [-i INPUT] [-o OUTPUT] [-p PHRASE] [-c]

use clap::Parser;
use std::path::PathBuf;
use std::process;

use shuffle_lines::{ShuffleCommand, ShuffleConfig, ShuffleError};

#[derive(Parser)]
#[command(name = "shuffle-lines")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "Shuffle lines so that lines of the same kind are spread apart", long_about = None)]
#[command(
    after_help = "A last line without a line break is written with one added \
                  (the previous line's \\n or \\r\\n). Patterns are matched \
                  against each line without its line break."
)]
struct Cli {
    /// UTF-8 input file (default: stdin, use - for stdin)
    #[arg(short, long, value_parser = trimmed_path)]
    input: Option<PathBuf>,

    /// UTF-8 output file (default: stdout, use - for stdout)
    #[arg(short, long, value_parser = trimmed_path)]
    output: Option<PathBuf>,

    /// Phrase to find the last line of the leading block
    #[arg(short, long, value_parser = trimmed)]
    phrase: Option<String>,

    /// Check each line for mentions and unknown hashtags
    #[arg(short, long, overrides_with = "no_check")]
    check: bool,

    /// Do not check lines (default)
    #[arg(long = "no-check", overrides_with = "check")]
    no_check: bool,

    /// Classification pattern (repeatable, first match wins)
    #[arg(long = "pattern", value_name = "REGEX")]
    patterns: Vec<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn trimmed(s: &str) -> Result<String, String> {
    Ok(s.trim().to_string())
}

fn trimmed_path(s: &str) -> Result<PathBuf, String> {
    Ok(PathBuf::from(s.trim()))
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = ShuffleConfig {
        input: cli.input,
        output: cli.output,
        phrase: cli.phrase,
        check_tweets: cli.check && !cli.no_check,
        seed: cli.seed,
        ..Default::default()
    };
    if !cli.patterns.is_empty() {
        config.patterns = cli.patterns;
    }

    let result = ShuffleCommand::new(config).and_then(|cmd| cmd.run());

    match result {
        Ok(stats) => {
            if cli.stats {
                eprintln!("Shuffle stats: {}", stats);
            }
        }
        Err(e @ ShuffleError::InternalConsistency { .. }) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
