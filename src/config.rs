//! Configuration for the benchmark runner.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one benchmark invocation.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Suspending units per timed pass.
    pub iterations: u64,
    /// Fixed delay of one suspending unit.
    pub delay: Duration,
    /// Iterations of the untimed cold pass run once per mode before
    /// measurement. Deliberately tiny: it exists to pull first-use
    /// initialization cost out of whichever mode runs first, not to warm the
    /// paths at scale.
    pub warmup_iterations: u64,
    /// Output directory for the JSON report.
    pub output_dir: PathBuf,
    /// Print progress lines to stderr.
    pub verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            delay: Duration::from_millis(10),
            warmup_iterations: 1,
            output_dir: PathBuf::from("target/affinity"),
            verbose: true,
        }
    }
}

impl BenchConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from environment variables.
    ///
    /// Supported variables:
    /// - `BENCH_ITERATIONS`: suspending units per timed pass (default: 1000)
    /// - `BENCH_DELAY_MS`: per-unit delay in milliseconds (default: 10)
    /// - `BENCH_WARMUP`: cold-pass iterations per mode (default: 1)
    /// - `BENCH_OUTPUT_DIR`: output directory for the JSON report
    /// - `BENCH_VERBOSE`: progress output (default: true)
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("BENCH_ITERATIONS") {
            if let Ok(n) = v.parse() {
                cfg.iterations = n;
            }
        }
        if let Ok(v) = std::env::var("BENCH_DELAY_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                cfg.delay = Duration::from_millis(ms);
            }
        }
        if let Ok(v) = std::env::var("BENCH_WARMUP") {
            if let Ok(n) = v.parse() {
                cfg.warmup_iterations = n;
            }
        }
        if let Ok(v) = std::env::var("BENCH_OUTPUT_DIR") {
            cfg.output_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("BENCH_VERBOSE") {
            cfg.verbose = v != "0" && !v.eq_ignore_ascii_case("false");
        }

        cfg
    }

    /// Set the number of suspending units per timed pass.
    pub fn iterations(mut self, n: u64) -> Self {
        self.iterations = n;
        self
    }

    /// Set the per-unit delay.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the cold-pass iteration count.
    pub fn warmup(mut self, n: u64) -> Self {
        self.warmup_iterations = n;
        self
    }

    /// Set the output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// Set verbose output.
    pub fn verbose(mut self, v: bool) -> Self {
        self.verbose = v;
        self
    }
}
