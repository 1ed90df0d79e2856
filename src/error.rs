//! Error types for the benchmark harness.

/// Failure of the underlying timer/marshal subsystem.
///
/// These are never retried: an error aborts the in-flight work loop and
/// propagates up to [`BenchmarkRunner`](crate::BenchmarkRunner), which is the
/// sole recovery boundary.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    /// The owning context's dispatcher thread is gone; nothing can be
    /// marshaled onto it anymore.
    #[error("owning execution context is closed")]
    ContextClosed,

    /// A continuation was handed to the owning context but dropped before it
    /// ran to completion (dispatcher tore down mid-flight).
    #[error("marshaled continuation was dropped before completion")]
    MarshalDropped,

    /// Context-affine dispatch was requested without an owning context.
    /// Context-free calls may pass an empty handle; affine calls may not.
    #[error("context-affine dispatch requires an execution context")]
    MissingContext,
}
