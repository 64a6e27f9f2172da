//! Blocking execution of a single engine invocation with tee capture.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use gmsweep_common::Invocation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitKind {
    /// The child exited with the given code.
    Code(i32),
    /// The child was terminated without an exit code (by a signal).
    Terminated,
}

impl ExitKind {
    fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitKind::Code(code),
            None => ExitKind::Terminated,
        }
    }

    pub fn success(self) -> bool {
        self == ExitKind::Code(0)
    }
}

impl Display for ExitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitKind::Code(code) => write!(f, "exit code {code}"),
            ExitKind::Terminated => write!(f, "terminated by signal"),
        }
    }
}

/// Result of one completed engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub exit: ExitKind,
    pub duration: Duration,
    /// Where the teed output landed.
    pub log_path: PathBuf,
    /// Output lines captured across stdout and stderr.
    pub lines: usize,
}

/// Errors that prevent a run from being executed at all. A child that runs
/// and exits non-zero is NOT an error; that is reported in [`RunOutcome`].
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to create log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error while capturing output: {0}")]
    Capture(#[from] std::io::Error),
}

/// Run `invocation` to completion, forwarding every output line to
/// `log_path` and, when `echo` is set, to this process's stdout.
///
/// stdout and stderr of the child are interleaved by arrival order, the way
/// a shell `cmd | tee log` session reads. The log file is created or
/// truncated per run. The call blocks until the child has exited and both
/// streams are drained.
pub fn run_teed(
    invocation: &Invocation,
    log_path: &Path,
    echo: bool,
) -> Result<RunOutcome, RunnerError> {
    let mut log = File::create(log_path).map_err(|source| RunnerError::LogFile {
        path: log_path.to_path_buf(),
        source,
    })?;

    let started = Instant::now();
    let mut child = invocation
        .to_command()
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            program: invocation.program().display().to_string(),
            source,
        })?;

    let (tx, rx) = mpsc::channel::<String>();
    if let Some(stdout) = child.stdout.take() {
        spawn_line_reader(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_line_reader(stderr, tx.clone());
    }
    // The iterator below ends once both reader threads are done.
    drop(tx);

    let mut lines = 0usize;
    for line in rx.iter() {
        writeln!(log, "{line}")?;
        if echo {
            println!("{line}");
        }
        lines += 1;
    }
    log.flush()?;

    let status = child.wait()?;

    Ok(RunOutcome {
        exit: ExitKind::from_status(status),
        duration: started.elapsed(),
        log_path: log_path.to_path_buf(),
        lines,
    })
}

fn spawn_line_reader<R: Read + Send + 'static>(stream: R, tx: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            match line {
                Ok(l) => {
                    if tx.send(l).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}
