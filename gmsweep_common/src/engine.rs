//! External matcher engines and command construction.
//!
//! The harness drives two opaque executables: a GPU matcher and a CPU
//! baseline. Neither is inspected beyond its exit status; this module only
//! models where the binaries live and the exact argument vectors they take.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::graph::GraphFile;
use crate::pattern::Pattern;

/// Which of the two engines a run belongs to. Also names the log file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    /// The GPU matcher (`gpu_graph`).
    Gpu,
    /// The CPU reference implementation (`baseline_test`).
    Cpu,
}

impl EngineKind {
    /// Suffix used in per-run log file names.
    pub fn log_suffix(self) -> &'static str {
        match self {
            EngineKind::Gpu => "gpu",
            EngineKind::Cpu => "cpu",
        }
    }
}

impl Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.log_suffix())
    }
}

/// Resolved locations of the two engine binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSet {
    gpu: PathBuf,
    cpu: PathBuf,
}

/// Default location of the GPU matcher, relative to the working directory.
pub const DEFAULT_GPU_BIN: &str = "bin/gpu_graph";
/// Default location of the CPU baseline, relative to the working directory.
pub const DEFAULT_CPU_BIN: &str = "bin/baseline_test";

impl EngineSet {
    /// Use the given binary paths as-is, without any lookup or existence
    /// check. A missing binary surfaces as a failed run when spawned.
    pub fn new(gpu: impl Into<PathBuf>, cpu: impl Into<PathBuf>) -> Self {
        EngineSet {
            gpu: gpu.into(),
            cpu: cpu.into(),
        }
    }

    /// Resolve binary names: a bare name (no path separator) is looked up on
    /// `PATH`, anything else is used as given. Lookup failures fall back to
    /// the literal name so the sweep still runs and records the spawn error
    /// per-run instead of aborting up front.
    pub fn resolve(gpu: &str, cpu: &str) -> Self {
        EngineSet {
            gpu: resolve_bin(gpu),
            cpu: resolve_bin(cpu),
        }
    }

    pub fn gpu_bin(&self) -> &Path {
        &self.gpu
    }

    pub fn cpu_bin(&self) -> &Path {
        &self.cpu
    }

    /// Command for the GPU matcher: `gpu_graph <graph_path> <bits>`.
    pub fn gpu_invocation(&self, graph: &GraphFile, pattern: &Pattern) -> Invocation {
        Invocation::new(
            &self.gpu,
            vec![
                graph.path().display().to_string(),
                pattern.bits().to_string(),
            ],
        )
    }

    /// Command for the CPU baseline: `baseline_test <graph_path> <order>
    /// <bits>`, where `<order>` is the pattern's derived matrix side length.
    pub fn cpu_invocation(&self, graph: &GraphFile, pattern: &Pattern) -> Invocation {
        Invocation::new(
            &self.cpu,
            vec![
                graph.path().display().to_string(),
                pattern.order().to_string(),
                pattern.bits().to_string(),
            ],
        )
    }

    /// The invocation for `kind`, dispatching to the matching builder.
    pub fn invocation(&self, kind: EngineKind, graph: &GraphFile, pattern: &Pattern) -> Invocation {
        match kind {
            EngineKind::Gpu => self.gpu_invocation(graph, pattern),
            EngineKind::Cpu => self.cpu_invocation(graph, pattern),
        }
    }
}

impl Default for EngineSet {
    fn default() -> Self {
        EngineSet::new(DEFAULT_GPU_BIN, DEFAULT_CPU_BIN)
    }
}

fn resolve_bin(name: &str) -> PathBuf {
    if Path::new(name).components().count() > 1 {
        return PathBuf::from(name);
    }
    match which::which(name) {
        Ok(found) => found,
        Err(err) => {
            tracing::debug!("{name} not found on PATH ({err}); using literal name");
            PathBuf::from(name)
        }
    }
}

/// One fully-specified child process: program path plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Invocation {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Shell-style rendering for banners and logs. Arguments containing
    /// whitespace are quoted.
    pub fn command_line(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(' ') {
                    format!("\"{arg}\"")
                } else {
                    arg.clone()
                }
            })
            .join(" ");
        format!("{} {}", self.program.display(), args)
    }

    /// Build the `Command` to spawn: stdin closed, stdout and stderr piped
    /// so the runner can tee them.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command_line())
    }
}
