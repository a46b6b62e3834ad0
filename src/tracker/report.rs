//! Completion reports for closed steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a step finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Finished within its threshold, or had none.
    Done,
    /// Took longer than its threshold.
    Slow,
}

/// Summary of a closed step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Dotted step number
    pub number: String,
    /// Caller-supplied title
    pub title: String,
    /// Wall-clock time the step opened
    pub started_at: DateTime<Utc>,
    /// Monotonic time between open and close
    pub elapsed: Duration,
    /// Threshold the step was opened with
    pub threshold: Option<Duration>,
    pub status: StepStatus,
}

impl StepReport {
    pub fn elapsed_ms(&self) -> f64 {
        millis(self.elapsed)
    }

    pub fn threshold_ms(&self) -> Option<f64> {
        self.threshold.map(millis)
    }

    pub fn is_slow(&self) -> bool {
        self.status == StepStatus::Slow
    }

    /// Completion line without indentation, e.g. `✔ Build (1,204ms)`.
    pub fn completion_line(&self) -> String {
        let line = format!(
            "✔ {} ({}ms)",
            self.title,
            group_thousands(self.elapsed_ms().round() as u64)
        );
        match self.status {
            StepStatus::Done => line,
            StepStatus::Slow => format!("⚠️ {line} — exceeded threshold"),
        }
    }
}

/// Strict comparison: a step that takes exactly its threshold is not slow.
pub(crate) fn status_for(elapsed: Duration, threshold: Option<Duration>) -> StepStatus {
    match threshold {
        Some(limit) if elapsed > limit => StepStatus::Slow,
        _ => StepStatus::Done,
    }
}

pub(crate) fn millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
