//! The sweep loop: patterns outermost, graphs innermost, GPU then CPU.

use std::path::PathBuf;

use gmsweep_common::{EngineKind, GraphFile, Pattern, SweepConfig, SweepPlan};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::runner::{RunOutcome, run_teed};

/// Log file name for one run: `<key>-p<n>-<gpu|cpu>.txt`, pattern numbers
/// 1-based.
pub fn log_file_name(graph_key: &str, pattern_no: usize, kind: EngineKind) -> String {
    format!("{graph_key}-p{pattern_no}-{}.txt", kind.log_suffix())
}

/// What became of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunResult {
    /// The child ran to completion, successfully or not.
    Finished(RunOutcome),
    /// The harness could not execute the child at all.
    Errored(String),
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        match self {
            RunResult::Finished(outcome) => outcome.exit.success(),
            RunResult::Errored(_) => false,
        }
    }
}

/// The harness-side account of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub graph: String,
    /// 1-based pattern number within the swept roster.
    pub pattern_no: usize,
    pub engine: EngineKind,
    pub result: RunResult,
}

/// Errors that abort a sweep before any run starts.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("failed to create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A configured sweep over a roster of patterns and graphs.
///
/// Execution is fully sequential: each run blocks until its child has
/// exited, the CPU run of a pair starts only after the GPU run, and there is
/// no timeout, so a stuck engine stalls the sweep. Engine failures are
/// recorded and logged, never propagated; the sweep always visits the whole
/// roster.
#[derive(Debug, Clone)]
pub struct Sweep {
    plan: SweepPlan,
    config: SweepConfig,
}

impl Sweep {
    pub fn new(plan: SweepPlan, config: SweepConfig) -> Self {
        Sweep { plan, config }
    }

    pub fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run every (pattern, graph) pair in roster order and return one record
    /// per engine run, in execution order.
    pub fn execute(&self) -> Result<Vec<RunRecord>, SweepError> {
        std::fs::create_dir_all(&self.config.log_dir).map_err(|source| SweepError::LogDir {
            path: self.config.log_dir.clone(),
            source,
        })?;

        let mut records = Vec::with_capacity(self.plan.pair_count() * 2);
        for (i, pattern) in self.plan.patterns.iter().enumerate() {
            let pattern_no = i + 1;
            if !pattern.is_square() {
                warn!(
                    "pattern p{pattern_no} has {} bits, not a perfect square; \
                     order truncates to {}",
                    pattern.bit_len(),
                    pattern.order()
                );
            }
            for graph in &self.plan.graphs {
                println!("\n>>> Graph: {} Pattern: p{pattern_no}\n", graph.key());
                for kind in [EngineKind::Gpu, EngineKind::Cpu] {
                    records.push(self.run_one(kind, graph, pattern, pattern_no));
                }
                println!("\n<<< Graph: {} Pattern: p{pattern_no}\n", graph.key());
            }
        }
        Ok(records)
    }

    fn run_one(
        &self,
        kind: EngineKind,
        graph: &GraphFile,
        pattern: &Pattern,
        pattern_no: usize,
    ) -> RunRecord {
        let invocation = self.config.engines.invocation(kind, graph, pattern);
        let log_path = self
            .config
            .log_dir
            .join(log_file_name(graph.key(), pattern_no, kind));

        debug!("running {invocation}");
        let result = match run_teed(&invocation, &log_path, self.config.echo) {
            Ok(outcome) => {
                if !outcome.exit.success() {
                    warn!(
                        "{kind} run for {} p{pattern_no} finished with {}",
                        graph.key(),
                        outcome.exit
                    );
                }
                RunResult::Finished(outcome)
            }
            Err(err) => {
                warn!(
                    "{kind} run for {} p{pattern_no} could not be executed: {err}",
                    graph.key()
                );
                RunResult::Errored(err.to_string())
            }
        };

        RunRecord {
            graph: graph.key().to_string(),
            pattern_no,
            engine: kind,
            result,
        }
    }
}
