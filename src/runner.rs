//! The benchmark runner: warm-up, two timed passes, report publication.

use crate::config::BenchConfig;
use crate::context::ExecutionContext;
use crate::error::SchedulingError;
use crate::mode::DispatchMode;
use crate::report::{ConsoleDiagnostics, ConsoleSink, DiagnosticSink, JsonSink, MultiSink, Sink};
use crate::result::{Measurement, Report};
use crate::scheduler::Scheduler;
use crate::work::run_loop;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Orchestrates one benchmark invocation end to end.
///
/// The runner is the sole recovery boundary: the layers below it propagate
/// every [`SchedulingError`] untouched, and the runner catches them at the top
/// of its protocol, records one diagnostic, and leaves the report in whatever
/// state it last published. Re-entrant invocation while a run is active is
/// silently dropped, never queued or interleaved.
pub struct BenchmarkRunner<S> {
    scheduler: S,
    config: BenchConfig,
    sink: Arc<dyn Sink>,
    diagnostics: Arc<dyn DiagnosticSink>,
    running: AtomicBool,
}

impl<S: Scheduler> BenchmarkRunner<S> {
    /// Create a runner with config from the environment.
    pub fn new(scheduler: S) -> Self {
        Self::with_config(scheduler, BenchConfig::from_env())
    }

    /// Create a runner with explicit config.
    pub fn with_config(scheduler: S, config: BenchConfig) -> Self {
        let json = JsonSink::new(config.output_dir.clone());
        let sink: Arc<dyn Sink> = if config.verbose {
            Arc::new(MultiSink::new(vec![Box::new(ConsoleSink), Box::new(json)]))
        } else {
            Arc::new(json)
        };

        Self {
            scheduler,
            config,
            sink,
            diagnostics: Arc::new(ConsoleDiagnostics),
            running: AtomicBool::new(false),
        }
    }

    /// Replace the result sink.
    pub fn sink(&mut self, sink: Arc<dyn Sink>) -> &mut Self {
        self.sink = sink;
        self
    }

    /// Replace the diagnostic sink.
    pub fn diagnostics(&mut self, diagnostics: Arc<dyn DiagnosticSink>) -> &mut Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Run the full benchmark protocol on the context the trigger captured.
    ///
    /// Returns `None` when a run is already in flight (the duplicate trigger
    /// is dropped). Otherwise returns the final report, which holds both
    /// measurements on success and the last published state after a failure.
    pub async fn execute(&self, cx: &ExecutionContext) -> Option<Report> {
        if self.running.swap(true, Ordering::AcqRel) {
            return None;
        }

        let mut report = Report::new();
        if let Err(e) = self.protocol(cx, &mut report).await {
            self.diagnostics.record(&e);
        }

        self.running.store(false, Ordering::Release);
        Some(report)
    }

    async fn protocol(
        &self,
        cx: &ExecutionContext,
        report: &mut Report,
    ) -> Result<(), SchedulingError> {
        let delay = self.config.delay;
        let warmup = self.config.warmup_iterations;

        // Cold pass per mode, untimed, so first-use initialization cost is
        // not misattributed to whichever mode runs first.
        run_loop(
            &self.scheduler,
            DispatchMode::ContextAffine,
            warmup,
            delay,
            Some(cx),
        )
        .await?;
        run_loop(
            &self.scheduler,
            DispatchMode::ContextFree,
            warmup,
            delay,
            Some(cx),
        )
        .await?;

        // The timed passes block logical progress for a visible duration.
        report.status("Processing...");
        self.publish(cx, report).await?;

        for mode in [DispatchMode::ContextAffine, DispatchMode::ContextFree] {
            let outcome = run_loop(&self.scheduler, mode, self.config.iterations, delay, Some(cx))
                .await?;
            // The sum exists to pin the loop's side effect; keep it observable.
            std::hint::black_box(outcome.sum);

            report.record(Measurement {
                mode,
                elapsed: outcome.elapsed,
            });
            self.publish(cx, report).await?;
        }

        Ok(())
    }

    /// Publish the current report state, always marshaled onto the owning
    /// context: the display is owned there even when the computation that
    /// produced the data was context-free.
    async fn publish(&self, cx: &ExecutionContext, report: &Report) -> Result<(), SchedulingError> {
        let sink = Arc::clone(&self.sink);
        let snapshot = report.clone();
        cx.run(move || sink.publish(&snapshot)).await
    }
}
