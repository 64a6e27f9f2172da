use clap::Parser;
use gmsweep_common::{
    DEFAULT_CPU_BIN, DEFAULT_GPU_BIN, DEFAULT_LOG_DIR, EngineSet, SweepConfig, SweepPlan,
    builtin_graphs, builtin_patterns, select_graphs, select_patterns,
};
use std::path::PathBuf;

/// gmsweep - benchmark sweep over external graph pattern-matching engines
#[derive(Parser, Debug)]
#[command(name = "gmsweep")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the built-in dataset files
    #[arg(short = 'd', long, default_value = "data")]
    pub data_root: PathBuf,

    /// Subset of built-in dataset keys to sweep (wv, pt, mc, lj, ok);
    /// default is all five, in roster order
    #[arg(short = 'g', long, value_delimiter = ',')]
    pub graphs: Vec<String>,

    /// Subset of built-in patterns to sweep, by 1-based number;
    /// default is all six, in roster order
    #[arg(short = 'p', long, value_delimiter = ',')]
    pub patterns: Vec<usize>,

    /// Load the sweep roster from a JSON plan file instead of the built-ins
    #[arg(long, conflicts_with_all = ["data_root", "graphs", "patterns"])]
    pub plan: Option<PathBuf>,

    /// GPU matcher binary (bare names are looked up on PATH)
    #[arg(long, default_value = DEFAULT_GPU_BIN)]
    pub gpu_bin: String,

    /// CPU baseline binary (bare names are looked up on PATH)
    #[arg(long, default_value = DEFAULT_CPU_BIN)]
    pub cpu_bin: String,

    /// Directory for per-run log files
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Suppress console echo of engine output (log files are still written)
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,

    /// Write the run records as CSV after the sweep
    #[arg(long)]
    pub summary_csv: Option<PathBuf>,
}

impl Args {
    /// Convert command-line arguments into the harness configuration
    pub fn to_config(&self) -> SweepConfig {
        SweepConfig::new()
            .with_engines(EngineSet::resolve(&self.gpu_bin, &self.cpu_bin))
            .with_log_dir(&self.log_dir)
            .with_echo(!self.quiet)
    }

    /// Build the roster to sweep: a plan file if given, otherwise the
    /// built-in roster filtered by the subset flags
    pub fn to_plan(&self) -> Result<SweepPlan, Box<dyn std::error::Error>> {
        if let Some(plan_path) = &self.plan {
            return Ok(SweepPlan::from_json_file(plan_path)?);
        }

        let graphs = if self.graphs.is_empty() {
            builtin_graphs(&self.data_root)
        } else {
            select_graphs(&self.data_root, &self.graphs)?
        };
        let patterns = if self.patterns.is_empty() {
            builtin_patterns()
        } else {
            select_patterns(&self.patterns)?
        };
        Ok(SweepPlan::new(graphs, patterns))
    }
}
