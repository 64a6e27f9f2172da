//! Sweep configuration and roster plans.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::EngineSet;
use crate::graph::GraphFile;
use crate::pattern::Pattern;
use crate::presets;

/// Default directory for per-run log files.
pub const DEFAULT_LOG_DIR: &str = "logs-2";

/// Harness-side settings for a sweep: which binaries to run, where logs go,
/// and whether engine output is echoed to the console while it is captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub engines: EngineSet,
    pub log_dir: PathBuf,
    pub echo: bool,
}

impl SweepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engines(mut self, engines: EngineSet) -> Self {
        self.engines = engines;
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            engines: EngineSet::default(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            echo: true,
        }
    }
}

/// The roster a sweep actually runs: ordered graphs and ordered patterns.
/// The sweep enumerates their full Cartesian product, patterns outermost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub graphs: Vec<GraphFile>,
    pub patterns: Vec<Pattern>,
}

/// Errors loading or saving a [`SweepPlan`].
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("failed to read plan file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed plan: {0}")]
    Json(#[from] serde_json::Error),
}

impl SweepPlan {
    pub fn new(graphs: Vec<GraphFile>, patterns: Vec<Pattern>) -> Self {
        SweepPlan { graphs, patterns }
    }

    /// The full production roster: all five built-in datasets under
    /// `data_root` crossed with all six built-in patterns.
    pub fn builtin(data_root: &Path) -> Self {
        SweepPlan {
            graphs: presets::builtin_graphs(data_root),
            patterns: presets::builtin_patterns(),
        }
    }

    /// Number of (pattern, graph) pairs; each pair produces two runs.
    pub fn pair_count(&self) -> usize {
        self.graphs.len() * self.patterns.len()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PlanError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json_string(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
