//! gmsweep benchmark sweep CLI
//!
//! Entry point for the gmsweep tool. Enumerates a roster of query patterns
//! and host graphs, runs the external GPU matcher and CPU baseline on every
//! pair, and tees each run's output to a per-run log file.

#[global_allocator]
/// Global allocator using jemalloc, matching the engines' long-lived
/// allocation profile.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::path::Path;

use clap::Parser;
use gmsweep_driver::{RunRecord, RunResult, Sweep};
use itertools::Itertools;
use tracing::{info, warn};

use args::Args;

/// Executes the gmsweep harness.
///
/// This function:
/// 1. Initializes logging
/// 2. Parses command-line arguments into a roster plan and a config
/// 3. Runs the sweep, one blocking engine process at a time
/// 4. Prints a per-run summary and optionally exports it as CSV
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    log_host_info();

    let plan = args.to_plan()?;
    let config = args.to_config();
    info!(
        "Sweeping {} patterns over {} graphs ({} engine runs)",
        plan.patterns.len(),
        plan.graphs.len(),
        plan.pair_count() * 2
    );

    let sweep = Sweep::new(plan, config);
    let records = sweep.execute()?;

    print_summary(&records);

    if let Some(csv_path) = &args.summary_csv {
        write_summary_csv(csv_path, &records)?;
        info!("Run records written to {}", csv_path.display());
    }

    // Engine failures are reported above but never fail the harness; the
    // logs are the product.
    Ok(())
}

fn log_host_info() {
    let sys = sysinfo::System::new_all();
    info!(
        "Host: {} CPUs, {} MiB memory",
        sys.cpus().len(),
        sys.total_memory() / (1024 * 1024)
    );
}

fn print_summary(records: &[RunRecord]) {
    println!("\n=== Sweep Summary ===");
    for record in records {
        let status = match &record.result {
            RunResult::Finished(outcome) => format!(
                "{} in {:.1}s ({} lines)",
                outcome.exit,
                outcome.duration.as_secs_f64(),
                outcome.lines
            ),
            RunResult::Errored(reason) => format!("not run: {reason}"),
        };
        println!(
            "{}-p{} [{}]: {status}",
            record.graph, record.pattern_no, record.engine
        );
    }

    let failed: Vec<&RunRecord> = records.iter().filter(|r| !r.result.is_success()).collect();
    if failed.is_empty() {
        info!("All {} runs completed successfully", records.len());
    } else {
        let names = failed
            .iter()
            .map(|r| format!("{}-p{}-{}", r.graph, r.pattern_no, r.engine))
            .join(", ");
        warn!("{} of {} runs failed: {names}", failed.len(), records.len());
    }
}

fn write_summary_csv(
    path: &Path,
    records: &[RunRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "graph",
        "pattern",
        "engine",
        "status",
        "duration_secs",
        "lines",
        "log_file",
    ])?;

    for record in records {
        let (status, duration, lines, log_file) = match &record.result {
            RunResult::Finished(outcome) => (
                outcome.exit.to_string(),
                format!("{:.3}", outcome.duration.as_secs_f64()),
                outcome.lines.to_string(),
                outcome.log_path.display().to_string(),
            ),
            RunResult::Errored(reason) => (
                format!("not run: {reason}"),
                String::new(),
                String::new(),
                String::new(),
            ),
        };
        let pattern = format!("p{}", record.pattern_no);
        writer.write_record([
            record.graph.as_str(),
            pattern.as_str(),
            record.engine.log_suffix(),
            status.as_str(),
            duration.as_str(),
            lines.as_str(),
            log_file.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
