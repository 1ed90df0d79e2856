//! The work loop: a fixed count of strictly sequential suspending units.

use crate::context::ExecutionContext;
use crate::error::SchedulingError;
use crate::mode::DispatchMode;
use crate::scheduler::Scheduler;
use crate::suspend::suspend;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of one work loop run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    /// Accumulated sum of the iteration indices. Only there to defeat
    /// dead-code elimination; always `n * (n - 1) / 2`.
    pub sum: u64,
    /// Wall-clock time from just before the first suspend to just after the
    /// last resumption.
    pub elapsed: Duration,
}

/// Drive `iterations` suspending units sequentially and time the whole
/// sequence.
///
/// Iteration `i + 1` is issued only after iteration `i` has fully resumed.
/// The sequential dependency is what makes per-resumption marshaling overhead
/// additive and therefore visible in the total; a batched loop would hide the
/// cost being measured.
///
/// Errors abort the loop and propagate; partial sums are discarded.
pub async fn run_loop<S: Scheduler>(
    scheduler: &S,
    mode: DispatchMode,
    iterations: u64,
    delay: Duration,
    cx: Option<&ExecutionContext>,
) -> Result<LoopOutcome, SchedulingError> {
    let start = Instant::now();
    let mut sum = 0u64;

    for i in 0..iterations {
        suspend(scheduler, delay, mode, cx).await?;
        sum += i;
    }

    Ok(LoopOutcome {
        sum,
        elapsed: start.elapsed(),
    })
}
