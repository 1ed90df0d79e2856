//! End-to-end protocol tests for the benchmark runner.
//!
//! Everything runs on the paused tokio clock with the deterministic fake
//! scheduler, so elapsed times are exact arithmetic rather than wall-clock
//! approximations.

use affinity_bench::{
    run_loop, BenchConfig, BenchmarkRunner, ContextHost, DiagnosticSink, DispatchMode,
    ExecutionContext, FakeScheduler, Report, Scheduler, SchedulingError, Sink,
};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(10);

/// Captures the full line state of every publish, in order.
#[derive(Default)]
struct RecordingSink {
    publishes: Mutex<Vec<Vec<String>>>,
}

impl RecordingSink {
    fn publishes(&self) -> Vec<Vec<String>> {
        self.publishes.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    fn publish(&self, report: &Report) {
        self.publishes.lock().unwrap().push(report.lines().to_vec());
    }
}

/// Counts diagnostic records and keeps their messages.
#[derive(Default)]
struct RecordingDiagnostics {
    records: Mutex<Vec<String>>,
}

impl DiagnosticSink for RecordingDiagnostics {
    fn record(&self, error: &SchedulingError) {
        self.records.lock().unwrap().push(error.to_string());
    }
}

/// Scheduler whose n-th sleep fails with a scheduling error.
struct FailingScheduler {
    fail_on_sleep: u64,
    sleeps: AtomicU64,
}

impl FailingScheduler {
    fn new(fail_on_sleep: u64) -> Self {
        Self {
            fail_on_sleep,
            sleeps: AtomicU64::new(0),
        }
    }
}

impl Scheduler for FailingScheduler {
    fn sleep(
        &self,
        delay: Duration,
    ) -> impl Future<Output = Result<(), SchedulingError>> + Send {
        let call = self.sleeps.fetch_add(1, Ordering::SeqCst) + 1;
        let fail_on = self.fail_on_sleep;
        async move {
            if call == fail_on {
                return Err(SchedulingError::ContextClosed);
            }
            tokio::time::sleep(delay).await;
            Ok(())
        }
    }

    fn marshal(
        &self,
        _cx: &ExecutionContext,
    ) -> impl Future<Output = Result<(), SchedulingError>> + Send {
        async { Ok(()) }
    }
}

fn runner_with(
    iterations: u64,
    warmup: u64,
    marshal_cost: Duration,
) -> (
    BenchmarkRunner<FakeScheduler>,
    Arc<RecordingSink>,
    Arc<RecordingDiagnostics>,
) {
    let config = BenchConfig::new()
        .iterations(iterations)
        .delay(DELAY)
        .warmup(warmup)
        .verbose(false);
    let sink = Arc::new(RecordingSink::default());
    let diagnostics = Arc::new(RecordingDiagnostics::default());

    let mut runner =
        BenchmarkRunner::with_config(FakeScheduler::with_marshal_cost(marshal_cost), config);
    runner.sink(sink.clone()).diagnostics(diagnostics.clone());

    (runner, sink, diagnostics)
}

#[tokio::test(start_paused = true)]
async fn should_publish_status_then_both_measurements_in_order() {
    let host = ContextHost::spawn().unwrap();
    let (runner, sink, diagnostics) = runner_with(3, 1, Duration::from_millis(2));

    let report = runner.execute(&host.handle()).await.unwrap();

    let publishes = sink.publishes();
    assert_eq!(publishes.len(), 3);
    assert_eq!(publishes[0], ["Processing..."]);
    assert_eq!(publishes[1].len(), 1);
    assert!(publishes[1][0].starts_with("context-affine"));
    assert_eq!(publishes[2].len(), 2);
    assert!(publishes[2][0].starts_with("context-affine"));
    assert!(publishes[2][1].starts_with("context-free"));

    assert!(report.is_complete());
    assert_eq!(report.measurements()[0].mode, DispatchMode::ContextAffine);
    assert_eq!(report.measurements()[1].mode, DispatchMode::ContextFree);
    assert!(diagnostics.records.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn should_charge_marshaling_only_to_the_affine_pass() {
    let host = ContextHost::spawn().unwrap();
    let cost = Duration::from_millis(4);
    let (runner, _sink, _diag) = runner_with(3, 0, cost);

    let report = runner.execute(&host.handle()).await.unwrap();

    let affine = report.measurements()[0].elapsed;
    let free = report.measurements()[1].elapsed;
    assert_eq!(affine, (DELAY + cost) * 3);
    assert_eq!(free, DELAY * 3);
    assert!(affine >= free);
}

#[tokio::test(start_paused = true)]
async fn should_measure_identical_passes_when_marshaling_is_free() {
    let host = ContextHost::spawn().unwrap();
    let (runner, _sink, _diag) = runner_with(3, 0, Duration::ZERO);

    let report = runner.execute(&host.handle()).await.unwrap();

    assert_eq!(
        report.measurements()[0].elapsed,
        report.measurements()[1].elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn should_drop_duplicate_trigger_while_running() {
    let host = ContextHost::spawn().unwrap();
    let cx = host.handle();
    let (runner, sink, _diag) = runner_with(5, 1, Duration::from_millis(1));

    // Both invocations are polled concurrently; the gate lets exactly one
    // through and the duplicate is a silent no-op.
    let (first, second) = tokio::join!(runner.execute(&cx), runner.execute(&cx));

    let reports: Vec<Report> = [first, second].into_iter().flatten().collect();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_complete());
    assert_eq!(sink.publishes().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn should_abort_loop_when_third_suspend_fails() {
    let sched = FailingScheduler::new(3);

    let err = run_loop(&sched, DispatchMode::ContextFree, 10, DELAY, None)
        .await
        .unwrap_err();

    assert!(matches!(err, SchedulingError::ContextClosed));
    // The failing call was the last one issued; the loop never reached
    // iteration four.
    assert_eq!(sched.sleeps.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn should_record_one_diagnostic_and_stop_publishing_after_failure() {
    let host = ContextHost::spawn().unwrap();

    let config = BenchConfig::new()
        .iterations(10)
        .delay(DELAY)
        .warmup(0)
        .verbose(false);
    let sink = Arc::new(RecordingSink::default());
    let diagnostics = Arc::new(RecordingDiagnostics::default());

    // Warm-up is disabled, so the third sleep is the third suspending unit of
    // the timed affine pass.
    let mut runner = BenchmarkRunner::with_config(FailingScheduler::new(3), config);
    runner.sink(sink.clone()).diagnostics(diagnostics.clone());

    let report = runner.execute(&host.handle()).await.unwrap();

    assert_eq!(diagnostics.records.lock().unwrap().len(), 1);
    // The status line was the last thing published before the abort; the
    // sink sees nothing further for this run.
    assert_eq!(sink.publishes(), vec![vec!["Processing...".to_string()]]);
    assert!(!report.is_complete());
    assert_eq!(report.lines(), ["Processing..."]);
}

#[tokio::test(start_paused = true)]
async fn should_allow_a_fresh_run_after_a_failed_one() {
    let host = ContextHost::spawn().unwrap();
    let cx = host.handle();

    let config = BenchConfig::new()
        .iterations(2)
        .delay(DELAY)
        .warmup(0)
        .verbose(false);
    let sink = Arc::new(RecordingSink::default());
    let diagnostics = Arc::new(RecordingDiagnostics::default());

    // Fails once during the first run's affine pass, then never again.
    let mut runner = BenchmarkRunner::with_config(FailingScheduler::new(1), config);
    runner.sink(sink.clone()).diagnostics(diagnostics.clone());

    let failed = runner.execute(&cx).await.unwrap();
    assert!(!failed.is_complete());

    let ok = runner.execute(&cx).await.unwrap();
    assert!(ok.is_complete());
    assert_eq!(diagnostics.records.lock().unwrap().len(), 1);
}
