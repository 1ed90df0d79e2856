//! The timer/worker subsystem seam.
//!
//! [`Scheduler`] is the one abstraction the harness uses for suspension and
//! marshaling. Both dispatch modes go through the same `sleep`, so they share
//! identical delay semantics and differ only in whether `marshal` runs.

use crate::context::ExecutionContext;
use crate::error::SchedulingError;
use std::future::Future;
use std::time::Duration;

/// Timer-based suspension plus context marshaling.
pub trait Scheduler: Send + Sync {
    /// Suspend the calling task for `delay` without blocking the thread.
    fn sleep(&self, delay: Duration)
        -> impl Future<Output = Result<(), SchedulingError>> + Send;

    /// Force the caller's continuation through the owning context before
    /// proceeding.
    fn marshal(
        &self,
        cx: &ExecutionContext,
    ) -> impl Future<Output = Result<(), SchedulingError>> + Send;
}

/// Production scheduler backed by the tokio timer wheel and a real
/// [`ExecutionContext`] round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn sleep(
        &self,
        delay: Duration,
    ) -> impl Future<Output = Result<(), SchedulingError>> + Send {
        async move {
            tokio::time::sleep(delay).await;
            Ok(())
        }
    }

    fn marshal(
        &self,
        cx: &ExecutionContext,
    ) -> impl Future<Output = Result<(), SchedulingError>> + Send {
        let cx = cx.clone();
        async move { cx.marshal().await }
    }
}

/// Deterministic scheduler for tests.
///
/// Sleeps still go through the tokio clock, so under a paused runtime
/// (`#[tokio::test(start_paused = true)]`) they consume exactly their nominal
/// duration and no wall time. Marshaling touches no real context; it costs
/// exactly [`marshal_cost`](Self::marshal_cost) of clock time per hop. With a
/// zero cost the two dispatch modes become indistinguishable, which is what
/// lets tests prove the harness isolates the marshaling variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeScheduler {
    /// Simulated cost of one context hop.
    pub marshal_cost: Duration,
}

impl FakeScheduler {
    /// Fake scheduler with a given per-hop marshaling cost.
    pub fn with_marshal_cost(cost: Duration) -> Self {
        Self { marshal_cost: cost }
    }
}

impl Scheduler for FakeScheduler {
    fn sleep(
        &self,
        delay: Duration,
    ) -> impl Future<Output = Result<(), SchedulingError>> + Send {
        async move {
            tokio::time::sleep(delay).await;
            Ok(())
        }
    }

    fn marshal(
        &self,
        _cx: &ExecutionContext,
    ) -> impl Future<Output = Result<(), SchedulingError>> + Send {
        let cost = self.marshal_cost;
        async move {
            if !cost.is_zero() {
                tokio::time::sleep(cost).await;
            }
            Ok(())
        }
    }
}
