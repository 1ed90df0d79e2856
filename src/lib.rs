//! # affinity-bench
//!
//! A single-shot micro-benchmark measuring the throughput cost of
//! execution-context propagation across many small asynchronous operations.
//!
//! Each unit of work suspends for a fixed short delay and resumes. The
//! harness drives a long strictly-sequential chain of such units twice:
//! once *context-affine*, where every resumption is marshaled back onto a
//! designated owning context (the way UI-bound code forces resumptions back
//! onto its thread), and once *context-free*, where resumption proceeds on
//! whichever worker thread completed the wait. The difference between the two
//! total wall times is the marshaling overhead.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use affinity_bench::{BenchConfig, BenchmarkRunner, ContextHost, TokioScheduler};
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let runtime = tokio::runtime::Builder::new_multi_thread()
//!     .enable_time()
//!     .build()?;
//!
//! let host = ContextHost::spawn()?;
//! let config = BenchConfig::new()
//!     .iterations(1000)
//!     .delay(Duration::from_millis(10));
//! let runner = BenchmarkRunner::with_config(TokioScheduler, config);
//!
//! if let Some(report) = runtime.block_on(runner.execute(&host.handle())) {
//!     println!("{report}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! By design the tool reports nothing beyond total elapsed wall time per
//! mode: no percentiles, no repeated trials, no warm-up-subtracted variance.

mod config;
mod context;
mod error;
mod mode;
mod report;
mod result;
mod runner;
mod scheduler;
mod suspend;
mod work;

pub use config::BenchConfig;
pub use context::{ContextHost, ExecutionContext};
pub use error::SchedulingError;
pub use mode::DispatchMode;
pub use report::{ConsoleDiagnostics, ConsoleSink, DiagnosticSink, JsonSink, MultiSink, Sink};
pub use result::{Measurement, Report};
pub use runner::BenchmarkRunner;
pub use scheduler::{FakeScheduler, Scheduler, TokioScheduler};
pub use suspend::suspend;
pub use work::{run_loop, LoopOutcome};
