//! Measurement and report types.

use crate::mode::DispatchMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One timed work-loop result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Measurement {
    /// Dispatch mode the loop ran under.
    pub mode: DispatchMode,
    /// Total wall-clock time for the loop.
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
}

impl Measurement {
    /// The human-readable report line for this measurement.
    pub fn line(&self) -> String {
        format!("{} : {} ms", self.mode, self.elapsed.as_millis())
    }
}

/// The current state of one benchmark invocation's output.
///
/// An ordered sequence of human-readable lines, rebuilt from scratch on every
/// invocation (never appended to across runs). The status line set before the
/// timed passes is replaced by the first measurement line; later measurement
/// lines are appended so both results stay visible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    lines: Vec<String>,
    measurements: Vec<Measurement>,
}

impl Report {
    /// Empty report for a fresh invocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the report with a single status line.
    pub fn status(&mut self, message: impl Into<String>) {
        self.lines = vec![message.into()];
    }

    /// Record a timed measurement.
    ///
    /// The first measurement replaces whatever status was showing; subsequent
    /// ones append.
    pub fn record(&mut self, measurement: Measurement) {
        if self.measurements.is_empty() {
            self.lines.clear();
        }
        self.lines.push(measurement.line());
        self.measurements.push(measurement);
    }

    /// Current report lines, in publication order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Measurements recorded so far, in run order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Whether both timed passes completed.
    pub fn is_complete(&self) -> bool {
        self.measurements.len() == 2
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_nanos().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let nanos = u128::deserialize(d)?;
        Ok(Duration::from_nanos(nanos as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn affine(ms: u64) -> Measurement {
        Measurement {
            mode: DispatchMode::ContextAffine,
            elapsed: Duration::from_millis(ms),
        }
    }

    fn free(ms: u64) -> Measurement {
        Measurement {
            mode: DispatchMode::ContextFree,
            elapsed: Duration::from_millis(ms),
        }
    }

    #[test]
    fn should_replace_status_with_first_measurement() {
        let mut report = Report::new();
        report.status("Processing...");
        assert_eq!(report.lines(), ["Processing..."]);

        report.record(affine(10_500));
        assert_eq!(report.lines(), ["context-affine : 10500 ms"]);
    }

    #[test]
    fn should_keep_first_line_when_second_measurement_lands() {
        let mut report = Report::new();
        report.status("Processing...");
        report.record(affine(10_500));
        report.record(free(10_100));

        assert_eq!(
            report.lines(),
            ["context-affine : 10500 ms", "context-free : 10100 ms"]
        );
        assert!(report.is_complete());
    }

    #[test]
    fn should_render_lines_joined_by_newline() {
        let mut report = Report::new();
        report.record(affine(1));
        report.record(free(2));

        assert_eq!(
            report.to_string(),
            "context-affine : 1 ms\ncontext-free : 2 ms"
        );
    }

    #[test]
    fn should_round_trip_through_json() {
        let mut report = Report::new();
        report.record(affine(42));

        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(back.lines(), report.lines());
        assert_eq!(back.measurements()[0].elapsed, Duration::from_millis(42));
    }
}
