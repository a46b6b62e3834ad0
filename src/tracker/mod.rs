//! The step tracker.
//!
//! `StepTracker` renders hierarchical, numbered and timed steps to a
//! console and optionally mirrors them to a structured log sink. It also
//! emits leveled messages that can be turned into failures or validation
//! outcomes.
//!
//! # Example
//!
//! ```rust
//! use steplog::{BufferConsole, StepTracker};
//!
//! let console = BufferConsole::new();
//! let tracker = StepTracker::builder().console(console.clone()).build();
//!
//! {
//!     let _build = tracker.begin_step("Build");
//!     let compile = tracker.begin_step("Compile");
//!     assert_eq!(compile.number(), "1.1");
//! }
//!
//! let texts = console.texts();
//! assert_eq!(texts[1], " 1. Build");
//! assert_eq!(texts[3], "   1.1. Compile");
//! ```
//!
//! # Threading
//!
//! The step stack is shared state. A tracker may be reached from several
//! threads, but steps opened from different threads interleave on one
//! stack; callers that need per-thread numbering must use one tracker per
//! thread or serialize their steps.

pub mod builder;
pub mod error;
pub mod guard;
pub mod options;
pub mod report;

pub use builder::StepTrackerBuilder;
pub use error::{Failure, TrackerError};
pub use guard::StepGuard;
pub use options::{Emit, StepOptions};
pub use report::{StepReport, StepStatus};

use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::core::{Level, Outcome, TrackerState, DEFAULT_SUCCESS_MESSAGE};
use crate::sink::{Console, LogRecord, LogSink, SpanFactory};
use colored::Color;
use guard::OpenStep;
use report::{millis, status_for};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Hierarchical step tracker with leveled console output.
pub struct StepTracker {
    pub(crate) config: TrackerConfig,
    pub(crate) console: Box<dyn Console>,
    pub(crate) log_sink: Option<Box<dyn LogSink>>,
    pub(crate) spans: Option<Box<dyn SpanFactory>>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) state: Mutex<TrackerState>,
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the plain and `*_result` emitters for one level.
macro_rules! leveled {
    ($(#[$meta:meta])* $name:ident, $result:ident, $level:expr) => {
        $(#[$meta])*
        ///
        /// Returns the message unchanged.
        pub fn $name(&self, message: impl Into<String>) -> String {
            let message = message.into();
            self.render($level, &message, None);
            message
        }

        $(#[$meta])*
        ///
        /// Returns the validation outcome for this level.
        pub fn $result(&self, message: impl Into<String>) -> Outcome {
            let message = message.into();
            self.render($level, &message, None);
            outcome_for($level, message)
        }
    };
}

impl StepTracker {
    /// Tracker writing to stdout with no log sink.
    pub fn new() -> Self {
        StepTrackerBuilder::new().build()
    }

    pub fn builder() -> StepTrackerBuilder {
        StepTrackerBuilder::new()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn has_log_sink(&self) -> bool {
        self.log_sink.is_some()
    }

    /// Number of steps currently open.
    pub fn depth(&self) -> usize {
        self.lock_state().depth()
    }

    /// Dotted number of the innermost open step.
    pub fn current_step(&self) -> Option<String> {
        self.lock_state().current()
    }

    /// Total steps opened over the tracker's lifetime.
    pub fn steps_opened(&self) -> u64 {
        self.lock_state().steps_opened()
    }

    /// Open a step with default options.
    pub fn begin_step(&self, title: impl Into<String>) -> StepGuard<'_> {
        self.begin_step_with(title, StepOptions::default())
    }

    /// Open a step.
    ///
    /// Prints the BEGIN line, logs a BEGIN event if logging applies, starts
    /// a span if a span factory is configured and starts the step timer.
    pub fn begin_step_with(&self, title: impl Into<String>, options: StepOptions) -> StepGuard<'_> {
        let title = title.into();
        let opened = self.lock_state().open();
        let log = options.log.unwrap_or(self.config.log_steps);

        self.console.write_line("", None);
        self.console.write_line(
            &format!("{}{}. {}", self.config.padding(opened.indent), opened.number, title),
            Some(Color::White),
        );
        if log {
            self.log(&LogRecord::StepBegin {
                step: &opened.number,
                title: &title,
            });
        }
        let span = self
            .spans
            .as_ref()
            .map(|spans| spans.start(&opened.number, &title));

        let step = OpenStep {
            id: opened.id,
            depth: opened.depth,
            number: opened.number,
            title,
            threshold: options.threshold,
            log,
            started: self.clock.now(),
            started_at: chrono::Utc::now(),
        };
        StepGuard::new(self, step, span)
    }

    /// Run `f` inside a step; the step closes however `f` exits.
    ///
    /// ```rust
    /// use steplog::{BufferConsole, StepOptions, StepTracker};
    ///
    /// let tracker = StepTracker::builder().console(BufferConsole::new()).build();
    /// let total = tracker.run_step("Sum", StepOptions::new(), |step| {
    ///     assert_eq!(step.number(), "1");
    ///     2 + 2
    /// });
    /// assert_eq!(total, 4);
    /// assert_eq!(tracker.depth(), 0);
    /// ```
    pub fn run_step<R>(
        &self,
        title: impl Into<String>,
        options: StepOptions,
        f: impl FnOnce(&StepGuard<'_>) -> R,
    ) -> R {
        let guard = self.begin_step_with(title, options);
        let result = f(&guard);
        drop(guard);
        result
    }

    pub(crate) fn end_step(&self, step: &OpenStep) -> Result<StepReport, TrackerError> {
        let elapsed = self.clock_now().saturating_duration_since(step.started);
        let indent = self.lock_state().close(step.id, step.depth)?;

        let report = StepReport {
            number: step.number.clone(),
            title: step.title.clone(),
            started_at: step.started_at,
            elapsed,
            threshold: step.threshold,
            status: status_for(elapsed, step.threshold),
        };

        let color = if report.is_slow() {
            Color::Yellow
        } else {
            Color::Green
        };
        self.console.write_line(
            &format!("{}{}", self.config.padding(indent), report.completion_line()),
            Some(color),
        );

        if step.log {
            let elapsed_ms = millis(elapsed);
            match step.threshold {
                Some(threshold) if report.is_slow() => self.log(&LogRecord::StepSlow {
                    step: &step.number,
                    title: &step.title,
                    elapsed_ms,
                    threshold_ms: millis(threshold),
                }),
                _ => self.log(&LogRecord::StepDone {
                    step: &step.number,
                    title: &step.title,
                    elapsed_ms,
                }),
            }
        }

        Ok(report)
    }

    leveled!(
        /// Emit a trace message.
        trace, trace_result, Level::Trace
    );
    leveled!(
        /// Emit a debug message.
        debug, debug_result, Level::Debug
    );
    leveled!(
        /// Emit an informational message.
        info, info_result, Level::Info
    );
    leveled!(
        /// Emit a warning.
        warning, warning_result, Level::Warning
    );
    leveled!(
        /// Emit an error. The `_result` form is always invalid.
        error, error_result, Level::Error
    );
    leveled!(
        /// Emit a critical failure. The `_result` form is always invalid.
        critical, critical_result, Level::Critical
    );
    leveled!(
        /// Emit a success message. Not logged unless requested.
        success, success_result, Level::Success
    );

    /// Emit the default success message, `✔ Done`.
    pub fn done(&self) -> String {
        self.success(DEFAULT_SUCCESS_MESSAGE)
    }

    pub fn done_result(&self) -> Outcome {
        self.success_result(DEFAULT_SUCCESS_MESSAGE)
    }

    /// Emit an untagged message in `color`. Not logged unless requested.
    pub fn message(&self, message: impl Into<String>, color: Color) -> String {
        let message = message.into();
        self.render(Level::Message(color), &message, None);
        message
    }

    pub fn message_result(&self, message: impl Into<String>, color: Color) -> Outcome {
        let message = message.into();
        self.render(Level::Message(color), &message, None);
        Outcome::valid()
    }

    /// Emit a message at `level` with explicit options.
    ///
    /// The message is rendered and, if applicable, logged before any
    /// failure requested through `options` is returned.
    pub fn emit<E>(
        &self,
        level: Level,
        message: impl Into<String>,
        options: Emit<'_, E>,
    ) -> Result<String, E> {
        let message = message.into();
        self.render(level, &message, options.log);
        match options.raise {
            Some(factory) => Err(factory(&message)),
            None => Ok(message),
        }
    }

    /// Like [`emit`](Self::emit), returning the level's validation outcome.
    pub fn emit_result<E>(
        &self,
        level: Level,
        message: impl Into<String>,
        options: Emit<'_, E>,
    ) -> Result<Outcome, E> {
        self.emit(level, message, options)
            .map(|message| outcome_for(level, message))
    }

    /// Blank line followed by a full-width rule.
    pub fn print_header(&self, color: Color) {
        self.console.write_line("", None);
        self.console.write_line(&self.config.rule(), Some(color));
    }

    /// Blank line, full-width rule, blank line.
    pub fn print_trailer(&self, color: Color) {
        self.console.write_line("", None);
        self.console.write_line(&self.config.rule(), Some(color));
        self.console.write_line("", None);
    }

    /// Drop `step` and every step opened after it from the stack.
    pub(crate) fn abandon_step(&self, step: &OpenStep) {
        let removed = self.lock_state().abandon(step.id);
        if removed > 0 {
            tracing::warn!(step = %step.number, removed, "abandoned steps closed out of order");
        }
    }

    pub(crate) fn clock_now(&self) -> Instant {
        self.clock.now()
    }

    fn render(&self, level: Level, message: &str, log: Option<bool>) {
        let indent = self.lock_state().indent();
        self.console.write_line(
            &format!("{}{}", self.config.padding(indent), level.decorate(message)),
            Some(level.color()),
        );
        if log.unwrap_or_else(|| level.logs_by_default()) {
            self.log(&LogRecord::Message {
                severity: level.severity(),
                text: message,
            });
        }
    }

    fn log(&self, record: &LogRecord<'_>) {
        if let Some(sink) = &self.log_sink {
            sink.record(record);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn outcome_for(level: Level, message: String) -> Outcome {
    if level.is_failure() {
        Outcome::invalid(message)
    } else {
        Outcome::valid()
    }
}
