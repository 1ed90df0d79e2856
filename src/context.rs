//! The owning execution context.
//!
//! An [`ExecutionContext`] identifies "where" resumed code is expected to run,
//! analogous to a UI thread or synchronization context. It is backed by a
//! dedicated dispatcher thread that runs marshaled continuations strictly
//! serially, in submission order.

use crate::error::SchedulingError;
use std::io;
use std::thread;
use tokio::sync::{mpsc, oneshot};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Owns the dispatcher thread behind an [`ExecutionContext`].
///
/// The thread drains jobs one at a time and exits once the host and every
/// handle have been dropped. A panicking continuation tears the dispatcher
/// down; later marshals observe [`SchedulingError::ContextClosed`].
pub struct ContextHost {
    tx: mpsc::UnboundedSender<Job>,
}

impl ContextHost {
    /// Spawn a dispatcher thread and return its host.
    pub fn spawn() -> io::Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        thread::Builder::new()
            .name("ctx-owner".to_string())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    job();
                }
            })?;

        Ok(Self { tx })
    }

    /// Get a handle to the owning context. Handles are cheap to clone.
    pub fn handle(&self) -> ExecutionContext {
        ExecutionContext {
            tx: self.tx.clone(),
        }
    }
}

/// Opaque handle to an owning execution context.
///
/// Captured once at benchmark start and passed explicitly from there; never
/// an ambient default.
#[derive(Clone)]
pub struct ExecutionContext {
    tx: mpsc::UnboundedSender<Job>,
}

impl ExecutionContext {
    /// Run `f` on the owning thread and wait for its result.
    pub async fn run<F, R>(&self, f: F) -> Result<R, SchedulingError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();

        self.tx
            .send(Box::new(move || {
                let _ = done_tx.send(f());
            }))
            .map_err(|_| SchedulingError::ContextClosed)?;

        done_rx.await.map_err(|_| SchedulingError::MarshalDropped)
    }

    /// One empty round trip through the owning thread.
    ///
    /// This is the unit of context-marshaling cost the benchmark measures.
    pub async fn marshal(&self) -> Result<(), SchedulingError> {
        self.run(|| ()).await
    }
}
