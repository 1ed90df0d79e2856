//! affinity-bench: run the context-marshaling benchmark from the command line.
//!
//! The binary plays the trigger role: it captures an owning execution
//! context, invokes the runner once, and prints the final report. All
//! benchmark failures are handled inside the runner (logged to stderr); the
//! binary only turns an incomplete report into a non-zero exit.

use affinity_bench::{BenchConfig, BenchmarkRunner, ContextHost, TokioScheduler};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "affinity-bench",
    about = "Measure execution-context marshaling overhead across async resumptions",
    long_about = "
Runs a long chain of small suspending operations twice: once with every
resumption marshaled back onto a designated owning context, and once with
resumptions continuing on whichever worker thread completed the wait.
Reports total elapsed wall time per mode.

With the defaults (1000 iterations x 10 ms) each pass takes over ten
seconds; progress is printed to stderr as it happens.
"
)]
struct Cli {
    /// Suspending units per timed pass
    #[arg(long, default_value_t = 1000)]
    iterations: u64,

    /// Delay of one suspending unit, in milliseconds
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// Iterations of the untimed cold pass run per mode
    #[arg(long, default_value_t = 1)]
    warmup: u64,

    /// Output directory for the JSON report
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Suppress progress output (the JSON report is still written)
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BenchConfig::from_env()
        .iterations(cli.iterations)
        .delay(Duration::from_millis(cli.delay_ms))
        .warmup(cli.warmup)
        .verbose(!cli.quiet);
    if let Some(dir) = cli.output_dir {
        config = config.output_dir(dir);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .context("Failed to build tokio runtime")?;

    let host = ContextHost::spawn().context("Failed to spawn owning context")?;
    let runner = BenchmarkRunner::with_config(TokioScheduler, config);

    let report = runtime
        .block_on(runner.execute(&host.handle()))
        .expect("single invocation cannot be in flight already");

    if !report.is_complete() {
        bail!("benchmark aborted before both passes completed");
    }

    println!("{report}");
    Ok(())
}
