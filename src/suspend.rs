//! The suspending unit: one non-blocking wait-then-resume operation.

use crate::context::ExecutionContext;
use crate::error::SchedulingError;
use crate::mode::DispatchMode;
use crate::scheduler::Scheduler;
use std::time::Duration;

/// Suspend the calling task for `delay`, then resume it according to `mode`.
///
/// Context-affine dispatch marshals the resumption onto `cx` before the
/// caller's continuation proceeds; context-free dispatch resumes on whichever
/// worker thread the timer fired on. One primitive parameterized by mode
/// keeps the delay semantics of the two modes identical.
///
/// `cx` may be `None` for context-free calls; affine calls without a context
/// fail with [`SchedulingError::MissingContext`].
pub async fn suspend<S: Scheduler>(
    scheduler: &S,
    delay: Duration,
    mode: DispatchMode,
    cx: Option<&ExecutionContext>,
) -> Result<(), SchedulingError> {
    scheduler.sleep(delay).await?;

    if mode == DispatchMode::ContextAffine {
        let cx = cx.ok_or(SchedulingError::MissingContext)?;
        scheduler.marshal(cx).await?;
    }

    Ok(())
}
