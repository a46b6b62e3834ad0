//! Builder for constructing step trackers.

use super::StepTracker;
use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::core::TrackerState;
use crate::sink::{Console, LogSink, SpanFactory, TerminalConsole};
use std::sync::Mutex;

/// Builder for [`StepTracker`] with a fluent API.
///
/// Every collaborator is optional: without a console the tracker writes
/// to stdout, without a log sink structured logging is skipped, and
/// without a span factory no spans are created.
///
/// # Example
///
/// ```rust
/// use steplog::{BufferConsole, MemorySink, StepTracker, TrackerConfig};
///
/// let console = BufferConsole::new();
/// let tracker = StepTracker::builder()
///     .config(TrackerConfig { indent_width: 4, ..TrackerConfig::default() })
///     .console(console.clone())
///     .log_sink(MemorySink::new())
///     .build();
///
/// tracker.info("ready");
/// assert_eq!(console.texts(), vec![" [⟳] ready".to_string()]);
/// ```
#[derive(Default)]
pub struct StepTrackerBuilder {
    config: Option<TrackerConfig>,
    console: Option<Box<dyn Console>>,
    log_sink: Option<Box<dyn LogSink>>,
    spans: Option<Box<dyn SpanFactory>>,
    clock: Option<Box<dyn Clock>>,
}

impl StepTrackerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Visual sink (defaults to a [`TerminalConsole`]).
    pub fn console(mut self, console: impl Console + 'static) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    /// Structured log sink (defaults to none).
    pub fn log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.log_sink = Some(Box::new(sink));
        self
    }

    /// Span factory invoked on every step open (defaults to none).
    pub fn spans(mut self, spans: impl SpanFactory + 'static) -> Self {
        self.spans = Some(Box::new(spans));
        self
    }

    /// Time source for step durations (defaults to [`SystemClock`]).
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> StepTracker {
        let config = self.config.unwrap_or_default();
        let console = self
            .console
            .unwrap_or_else(|| Box::new(TerminalConsole::new(config.color)));

        StepTracker {
            console,
            log_sink: self.log_sink,
            spans: self.spans,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            state: Mutex::new(TrackerState::new()),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferConsole;

    #[test]
    fn builder_defaults_have_no_log_sink() {
        let tracker = StepTrackerBuilder::new().build();
        assert!(!tracker.has_log_sink());
        assert_eq!(tracker.config(), &TrackerConfig::default());
    }

    #[test]
    fn builder_applies_config() {
        let console = BufferConsole::new();
        let tracker = StepTrackerBuilder::new()
            .config(TrackerConfig {
                indent_width: 3,
                ..TrackerConfig::default()
            })
            .console(console.clone())
            .build();

        let _step = tracker.begin_step("Outer");
        tracker.info("nested");

        assert_eq!(console.texts().last().unwrap(), "    [⟳] nested");
    }
}
