//! Scoped handle for an open step.

use super::error::TrackerError;
use super::report::StepReport;
use super::StepTracker;
use crate::sink::ActiveSpan;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::{Duration, Instant};

/// An open step. Closing it pops the step and reports its completion.
///
/// The step closes when the guard is dropped, so it is released on every
/// exit path including `?` returns and panics. Closing more than once is
/// a no-op.
///
/// Guards must close in LIFO order. Closing a guard while a step opened
/// after it is still open is a contract violation: [`close`](Self::close)
/// and `Drop` panic, [`try_close`](Self::try_close) returns
/// [`TrackerError::OutOfOrderClose`]. A guard dropped out of order first
/// discards its step and every step opened after it, so the tracker's
/// stack stays consistent, then panics. If the thread is already
/// panicking it only logs the violation.
#[must_use = "the step closes as soon as the guard is dropped"]
pub struct StepGuard<'t> {
    tracker: &'t StepTracker,
    step: OpenStep,
    span: Option<Box<dyn ActiveSpan>>,
    released: bool,
}

/// Identity and timing of an open step.
#[derive(Clone, Debug)]
pub(crate) struct OpenStep {
    pub id: u64,
    pub depth: usize,
    pub number: String,
    pub title: String,
    pub threshold: Option<Duration>,
    pub log: bool,
    pub started: Instant,
    pub started_at: DateTime<Utc>,
}

impl<'t> StepGuard<'t> {
    pub(crate) fn new(
        tracker: &'t StepTracker,
        step: OpenStep,
        span: Option<Box<dyn ActiveSpan>>,
    ) -> Self {
        Self {
            tracker,
            step,
            span,
            released: false,
        }
    }

    /// Dotted step number, e.g. `2.1`.
    pub fn number(&self) -> &str {
        &self.step.number
    }

    pub fn title(&self) -> &str {
        &self.step.title
    }

    pub fn threshold(&self) -> Option<Duration> {
        self.step.threshold
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Time since the step opened, per the tracker's clock.
    pub fn elapsed(&self) -> Duration {
        self.tracker
            .clock_now()
            .saturating_duration_since(self.step.started)
    }

    /// Close the step, returning its report on the first call.
    ///
    /// # Panics
    ///
    /// Panics if a step opened after this one is still open.
    pub fn close(&mut self) -> Option<StepReport> {
        match self.try_close() {
            Ok(report) => report,
            Err(err) => panic!("{err}"),
        }
    }

    /// Close the step, reporting an out-of-order close as an error.
    ///
    /// On error the guard stays open and the tracker is unchanged.
    pub fn try_close(&mut self) -> Result<Option<StepReport>, TrackerError> {
        if self.released {
            return Ok(None);
        }
        let report = self.tracker.end_step(&self.step)?;
        self.released = true;
        if let Some(span) = self.span.take() {
            span.finish(&report);
        }
        Ok(Some(report))
    }

    /// Close the step and consume the guard.
    pub fn finish(mut self) -> Option<StepReport> {
        self.close()
    }
}

impl Drop for StepGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.try_close() {
            self.tracker.abandon_step(&self.step);
            self.released = true;
            if std::thread::panicking() {
                tracing::error!(step = %self.step.number, "{}", err);
            } else {
                panic!("{err}");
            }
        }
    }
}

impl fmt::Debug for StepGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepGuard")
            .field("number", &self.step.number)
            .field("title", &self.step.title)
            .field("threshold", &self.step.threshold)
            .field("released", &self.released)
            .finish()
    }
}
