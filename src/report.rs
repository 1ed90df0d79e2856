//! Pluggable sinks for report and diagnostic output.

use crate::error::SchedulingError;
use crate::result::Report;
use std::path::PathBuf;

/// Receives the full report state on every update.
///
/// A completed run publishes at least three times: the status line, then one
/// update per timed pass. The runner marshals every publish onto the owning
/// context, so implementations are always called from the display-owning
/// thread.
pub trait Sink: Send + Sync {
    /// Render the current report state.
    fn publish(&self, report: &Report);
}

/// Prints the newest report line to stderr.
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn publish(&self, report: &Report) {
        if let Some(line) = report.lines().last() {
            eprintln!("  {line}");
        }
    }
}

/// Rewrites `report.json` in the output directory on each publish, so the
/// file always holds the latest state and the final state persists.
pub struct JsonSink {
    output_dir: PathBuf,
}

impl JsonSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn write(&self, report: &Report) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
        std::fs::write(self.output_dir.join("report.json"), json)
    }
}

impl Sink for JsonSink {
    fn publish(&self, report: &Report) {
        if let Err(e) = self.write(report) {
            eprintln!("Warning: failed to write JSON report: {}", e);
        }
    }
}

/// Fans a publish out to several sinks.
pub struct MultiSink {
    sinks: Vec<Box<dyn Sink>>,
}

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }
}

impl Sink for MultiSink {
    fn publish(&self, report: &Report) {
        for sink in &self.sinks {
            sink.publish(report);
        }
    }
}

/// Out-of-band destination for unhandled scheduling failures.
///
/// Records never surface through the result [`Sink`].
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, error: &SchedulingError);
}

/// Logs diagnostics to stderr.
pub struct ConsoleDiagnostics;

impl DiagnosticSink for ConsoleDiagnostics {
    fn record(&self, error: &SchedulingError) {
        eprintln!("benchmark run aborted: {}", error);
    }
}
