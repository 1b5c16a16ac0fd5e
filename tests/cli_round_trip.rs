//! End-to-end tests for the shuffle-lines binary.
//!
//! Tests cover:
//! 1. file/stdin input and file/stdout output combinations
//! 2. line terminator preservation (LF and CRLF)
//! 3. split phrase handling, including a missing phrase
//! 4. parameter errors (missing input, identical files)
//! 5. the optional tweet checker

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, NamedTempFile};

// =============================================================================
// Helper functions
// =============================================================================

const SAMPLE: &str = "やめるのだフェネック その1\n\
                      やめるのだフェネック その2\n\
                      けものフレンズ 1話\n\
                      けものフレンズ 2話\n\
                      すごーい\n\
                      たーのしー\n\
                      わーい\n";

fn create_text_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn run_shuffle(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shuffle-lines"))
        .args(args)
        .output()
        .expect("Failed to run shuffle-lines")
}

fn run_shuffle_with_stdin(args: &[&str], stdin_content: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_shuffle-lines"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn shuffle-lines");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_content.as_bytes()).unwrap();
    }

    child
        .wait_with_output()
        .expect("Failed to wait for shuffle-lines")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn sorted_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    lines.sort();
    lines
}

// =============================================================================
// I/O combinations
// =============================================================================

#[test]
fn test_file_to_file() {
    let input = create_text_file(SAMPLE);
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.txt");

    let output = run_shuffle(&[
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        out_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "");
    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(sorted_lines(&written), sorted_lines(SAMPLE));
}

#[test]
fn test_file_to_stdout() {
    let input = create_text_file(SAMPLE);

    let output = run_shuffle(&["-i", input.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stderr(&output), "");
    assert_eq!(sorted_lines(&stdout(&output)), sorted_lines(SAMPLE));
}

#[test]
fn test_stdin_to_file() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.txt");

    let output = run_shuffle_with_stdin(&["-o", out_path.to_str().unwrap()], SAMPLE);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(sorted_lines(&written), sorted_lines(SAMPLE));
}

#[test]
fn test_stdin_to_stdout() {
    let output = run_shuffle_with_stdin(&[], SAMPLE);

    assert!(output.status.success());
    assert_eq!(sorted_lines(&stdout(&output)), sorted_lines(SAMPLE));
}

#[test]
fn test_dash_means_stdio() {
    let output = run_shuffle_with_stdin(&["-i", "-", "-o", "-"], SAMPLE);

    assert!(output.status.success());
    assert_eq!(sorted_lines(&stdout(&output)), sorted_lines(SAMPLE));
}

#[test]
fn test_empty_input() {
    let output = run_shuffle_with_stdin(&[], "");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_seed_is_reproducible() {
    let input = create_text_file(SAMPLE);
    let path = input.path().to_str().unwrap();

    let a = run_shuffle(&["-i", path, "--seed", "17"]);
    let b = run_shuffle(&["-i", path, "--seed", "17"]);

    assert!(a.status.success());
    assert_eq!(stdout(&a), stdout(&b));
}

// =============================================================================
// Line terminators
// =============================================================================

#[test]
fn test_keeps_crlf() {
    let content = SAMPLE.replace('\n', "\r\n");
    let output = run_shuffle_with_stdin(&[], &content);

    assert!(output.status.success());
    let out = stdout(&output);
    assert_eq!(out.matches("\r\n").count(), 7);
    assert_eq!(sorted_lines(&out), sorted_lines(&content));
}

#[test]
fn test_keeps_lf() {
    let output = run_shuffle_with_stdin(&[], SAMPLE);

    assert!(output.status.success());
    assert!(!stdout(&output).contains('\r'));
}

#[test]
fn test_unterminated_last_line() {
    let output = run_shuffle_with_stdin(&[], "a\nb\nc");

    assert!(output.status.success());
    assert_eq!(sorted_lines(&stdout(&output)), vec!["a\n", "b\n", "c\n"]);
}

#[test]
fn test_invalid_utf8_is_accepted() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_shuffle-lines"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"ok\n\x82\xa0bad\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(sorted_lines(&stdout(&output)), vec!["  bad\n", "ok\n"]);
}

// =============================================================================
// Split phrase
// =============================================================================

#[test]
fn test_phrase_moves_tail_to_front() {
    let content = "a\nb\nc\nx\n1\n2\n3\n";
    let input = create_text_file(content);

    for _ in 0..5 {
        let output = run_shuffle(&[
            "-i",
            input.path().to_str().unwrap(),
            "-p",
            "x",
            "--pattern",
            r"\d+",
        ]);
        assert!(output.status.success());

        let out = stdout(&output);
        let sorted = sorted_lines(&out);
        assert_eq!(sorted.len(), 7);

        let lines: Vec<&str> = out.split_inclusive('\n').collect();
        let mut head: Vec<&str> = lines[..3].to_vec();
        head.sort_unstable();
        assert_eq!(head, vec!["1\n", "2\n", "3\n"]);
    }
}

#[test]
fn test_phrase_is_trimmed() {
    let output = run_shuffle_with_stdin(&["-p", "  It rains  "], "a\nIt rains\nb\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.split_inclusive('\n').collect();
    assert_eq!(lines[0], "b\n");
    assert_eq!(sorted_lines(&out), vec!["It rains\n", "a\n", "b\n"]);
}

#[test]
fn test_missing_phrase_fails() {
    let input = create_text_file(SAMPLE);
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.txt");

    let output = run_shuffle(&[
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        out_path.to_str().unwrap(),
        "-p",
        "我々は賢いので",
    ]);

    assert!(!output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("Cannot find 我々は賢いので in the input."));
    assert!(!out_path.exists());
}

#[test]
fn test_empty_phrase() {
    // Found on the first line of a non-empty input
    let output = run_shuffle_with_stdin(&["-p", ""], "a\n");
    assert!(output.status.success());

    // Never found in an empty input
    let output = run_shuffle_with_stdin(&["-p", ""], "");
    assert!(!output.status.success());
}

// =============================================================================
// Parameter errors
// =============================================================================

#[test]
fn test_missing_input_file() {
    let output = run_shuffle(&["-i", "__f_i_l_e_not_exist__"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("__f_i_l_e_not_exist__ does not exist."));
}

#[test]
fn test_identical_files() {
    let file = create_text_file(SAMPLE);
    let path = file.path().to_str().unwrap();

    let output = run_shuffle(&["-i", path, "-o", path]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Input and output files are identical."));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), SAMPLE);
}

#[test]
fn test_invalid_pattern() {
    let output = run_shuffle_with_stdin(&["--pattern", "("], "a\n");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid pattern"));
}

// =============================================================================
// Checker
// =============================================================================

#[test]
fn test_check_reports_to_stderr() {
    let content = "hello @someone\n#include <x>\n#unknown tag\n";
    let output = run_shuffle_with_stdin(&["-c"], content);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Mention(s) found in hello @someone"));
    assert!(err.contains("Unknown tag(s) #unknown found"));
    assert!(!err.contains("#include"));
    assert_eq!(sorted_lines(&stdout(&output)), sorted_lines(content));
}

#[test]
fn test_no_check_by_default() {
    let output = run_shuffle_with_stdin(&[], "hello @someone\n");

    assert!(output.status.success());
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_stats_flag() {
    let output = run_shuffle_with_stdin(&["--stats"], SAMPLE);

    assert!(output.status.success());
    assert!(stderr(&output).contains("lines=7, segments=1"));
}

#[test]
fn test_help_mentions_added_line_break() {
    let output = run_shuffle(&["--help"]);

    assert!(output.status.success());
    assert!(stdout(&output)
        .contains("A last line without a line break is written with one added"));
}

#[test]
fn test_anchored_pattern_matches_terminated_lines() {
    // Digits-only lines form the largest bucket, so they are the only lines
    // allowed to sit next to each other
    let content = "1\n2\n3\na\nb\n";
    for seed in 0..10 {
        let seed = seed.to_string();
        let output =
            run_shuffle_with_stdin(&["--pattern", r"^\d+$", "--seed", &seed], content);
        assert!(output.status.success());

        let out = stdout(&output);
        let lines: Vec<&str> = out.split_inclusive('\n').collect();
        for pair in lines.windows(2) {
            let both_letters = pair[0].starts_with(char::is_alphabetic)
                && pair[1].starts_with(char::is_alphabetic);
            assert!(!both_letters, "{out}");
        }
    }
}
