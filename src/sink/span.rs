//! Optional tracing spans tied to the step lifecycle.
//!
//! The tracker only sees the [`SpanFactory`] and [`ActiveSpan`] traits, so
//! step numbering stays testable without a tracing backend.

use crate::tracker::StepReport;
use tracing::field::Empty;

/// Starts a span when a step opens.
pub trait SpanFactory: Send + Sync {
    fn start(&self, number: &str, title: &str) -> Box<dyn ActiveSpan>;
}

/// A span belonging to an open step.
pub trait ActiveSpan: Send {
    /// Attach the step's completion data and end the span.
    fn finish(self: Box<Self>, report: &StepReport);
}

/// Creates `tracing` spans named `step`.
///
/// The span is not entered; it records `step.number`, `step.title` and
/// `step.elapsed_ms` and closes when the step closes.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSpans;

struct TracingSpan {
    span: tracing::Span,
}

impl SpanFactory for TracingSpans {
    fn start(&self, number: &str, title: &str) -> Box<dyn ActiveSpan> {
        let span = tracing::info_span!(
            "step",
            step.number = %number,
            step.title = %title,
            step.elapsed_ms = Empty,
            step.slow = Empty
        );
        Box::new(TracingSpan { span })
    }
}

impl ActiveSpan for TracingSpan {
    fn finish(self: Box<Self>, report: &StepReport) {
        self.span.record("step.elapsed_ms", report.elapsed_ms());
        self.span.record("step.slow", report.is_slow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::StepStatus;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn tracing_span_finishes_without_subscriber() {
        let span = TracingSpans.start("1", "Build");
        let report = StepReport {
            number: "1".to_string(),
            title: "Build".to_string(),
            started_at: Utc::now(),
            elapsed: Duration::from_millis(3),
            threshold: None,
            status: StepStatus::Done,
        };

        span.finish(&report);
    }
}
