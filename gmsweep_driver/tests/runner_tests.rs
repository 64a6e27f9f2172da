#![cfg(unix)]
#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use gmsweep_common::Invocation;
use gmsweep_driver::{ExitKind, RunnerError, run_teed};
use rstest::rstest;

fn sh(script: &str) -> Invocation {
    Invocation::new("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[test]
fn test_captures_stdout_to_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.txt");

    let outcome = run_teed(&sh("echo alpha; echo beta"), &log, false).unwrap();

    assert_eq!(outcome.exit, ExitKind::Code(0));
    assert_eq!(outcome.lines, 2);
    assert_eq!(outcome.log_path, log);
    assert_eq!(std::fs::read_to_string(&log).unwrap(), "alpha\nbeta\n");
}

#[test]
fn test_captures_stderr_alongside_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.txt");

    let outcome = run_teed(&sh("echo out; echo err >&2"), &log, false).unwrap();

    assert_eq!(outcome.lines, 2);
    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("out\n"), "{content:?}");
    assert!(content.contains("err\n"), "{content:?}");
}

#[rstest]
#[case(0, true)]
#[case(3, false)]
#[case(77, false)]
fn test_exit_codes_are_data_not_errors(#[case] code: i32, #[case] success: bool) {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.txt");

    let outcome = run_teed(&sh(&format!("echo partial; exit {code}")), &log, false).unwrap();

    assert_eq!(outcome.exit, ExitKind::Code(code));
    assert_eq!(outcome.exit.success(), success);
    assert_eq!(std::fs::read_to_string(&log).unwrap(), "partial\n");
}

#[test]
fn test_missing_binary_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.txt");
    let inv = Invocation::new("/nonexistent/gpu_graph", vec!["x".to_string()]);

    let err = run_teed(&inv, &log, false).unwrap_err();
    assert!(matches!(err, RunnerError::Spawn { .. }), "{err}");
}

#[test]
fn test_unwritable_log_path_is_log_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("missing-subdir").join("out.txt");

    let err = run_teed(&sh("echo hi"), &log, false).unwrap_err();
    assert!(matches!(err, RunnerError::LogFile { .. }), "{err}");
}

#[test]
fn test_log_is_truncated_per_run() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.txt");

    run_teed(&sh("echo first-long-run-output"), &log, false).unwrap();
    run_teed(&sh("echo second"), &log, false).unwrap();

    assert_eq!(std::fs::read_to_string(&log).unwrap(), "second\n");
}

#[test]
fn test_blocks_until_child_exits() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.txt");

    let outcome = run_teed(&sh("sleep 0.2; echo done"), &log, false).unwrap();

    assert!(outcome.duration.as_millis() >= 200, "{:?}", outcome.duration);
    assert_eq!(std::fs::read_to_string(&log).unwrap(), "done\n");
}
