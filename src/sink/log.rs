//! Structured log sink.
//!
//! Step lifecycle events carry their identity as structured fields rather
//! than interpolating them into the message text.

use crate::core::Severity;
use std::sync::{Arc, Mutex, PoisonError};

/// A structured event handed to a [`LogSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum LogRecord<'a> {
    /// A leveled message forwarded verbatim.
    Message { severity: Severity, text: &'a str },

    /// A step was opened.
    StepBegin { step: &'a str, title: &'a str },

    /// A step closed within its threshold (or had none).
    StepDone {
        step: &'a str,
        title: &'a str,
        elapsed_ms: f64,
    },

    /// A step closed after its threshold elapsed.
    StepSlow {
        step: &'a str,
        title: &'a str,
        elapsed_ms: f64,
        threshold_ms: f64,
    },
}

impl LogRecord<'_> {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Message { severity, .. } => *severity,
            Self::StepBegin { .. } | Self::StepDone { .. } => Severity::Information,
            Self::StepSlow { .. } => Severity::Warning,
        }
    }

    /// Human-readable rendering of the event.
    pub fn render(&self) -> String {
        match self {
            Self::Message { text, .. } => (*text).to_string(),
            Self::StepBegin { step, title } => format!("{step} BEGIN: {title}"),
            Self::StepDone {
                step,
                title,
                elapsed_ms,
            } => format!("{step} DONE: {title} ({elapsed_ms}ms)"),
            Self::StepSlow {
                step,
                title,
                elapsed_ms,
                threshold_ms,
            } => format!("{step} SLOW: {title} took {elapsed_ms}ms (threshold {threshold_ms}ms)"),
        }
    }
}

/// Destination for structured log events.
pub trait LogSink: Send + Sync {
    fn record(&self, record: &LogRecord<'_>);
}

/// Forwards events to the `tracing` facade.
///
/// `Critical` has no `tracing` level of its own; it is emitted at error
/// level with `critical = true`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, record: &LogRecord<'_>) {
        match *record {
            LogRecord::Message { severity, text } => match severity {
                Severity::Trace => tracing::trace!("{}", text),
                Severity::Debug => tracing::debug!("{}", text),
                Severity::Information => tracing::info!("{}", text),
                Severity::Warning => tracing::warn!("{}", text),
                Severity::Error => tracing::error!("{}", text),
                Severity::Critical => tracing::error!(critical = true, "{}", text),
            },
            LogRecord::StepBegin { step, title } => {
                tracing::info!(step = %step, title = %title, "step begin");
            }
            LogRecord::StepDone {
                step,
                title,
                elapsed_ms,
            } => {
                tracing::info!(step = %step, title = %title, elapsed_ms, "step done");
            }
            LogRecord::StepSlow {
                step,
                title,
                elapsed_ms,
                threshold_ms,
            } => {
                tracing::warn!(
                    step = %step,
                    title = %title,
                    elapsed_ms,
                    threshold_ms,
                    "step exceeded threshold"
                );
            }
        }
    }
}

/// Owned copy of a [`LogRecord`], as kept by [`MemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedRecord {
    pub severity: Severity,
    pub kind: RecordKind,
    pub text: String,
    pub step: Option<String>,
    pub title: Option<String>,
    pub elapsed_ms: Option<f64>,
    pub threshold_ms: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Message,
    StepBegin,
    StepDone,
    StepSlow,
}

impl From<&LogRecord<'_>> for CapturedRecord {
    fn from(record: &LogRecord<'_>) -> Self {
        let mut captured = CapturedRecord {
            severity: record.severity(),
            kind: RecordKind::Message,
            text: record.render(),
            step: None,
            title: None,
            elapsed_ms: None,
            threshold_ms: None,
        };
        match *record {
            LogRecord::Message { .. } => {}
            LogRecord::StepBegin { step, title } => {
                captured.kind = RecordKind::StepBegin;
                captured.step = Some(step.to_string());
                captured.title = Some(title.to_string());
            }
            LogRecord::StepDone {
                step,
                title,
                elapsed_ms,
            } => {
                captured.kind = RecordKind::StepDone;
                captured.step = Some(step.to_string());
                captured.title = Some(title.to_string());
                captured.elapsed_ms = Some(elapsed_ms);
            }
            LogRecord::StepSlow {
                step,
                title,
                elapsed_ms,
                threshold_ms,
            } => {
                captured.kind = RecordKind::StepSlow;
                captured.step = Some(step.to_string());
                captured.title = Some(title.to_string());
                captured.elapsed_ms = Some(elapsed_ms);
                captured.threshold_ms = Some(threshold_ms);
            }
        }
        captured
    }
}

/// In-memory sink for assertions on structured output.
///
/// Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records of the given kind, in emission order.
    pub fn of_kind(&self, kind: RecordKind) -> Vec<CapturedRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.kind == kind)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl LogSink for MemorySink {
    fn record(&self, record: &LogRecord<'_>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedRecord::from(record));
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn record(&self, record: &LogRecord<'_>) {
        (**self).record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_events_have_fixed_severity() {
        let begin = LogRecord::StepBegin {
            step: "1",
            title: "Build",
        };
        let slow = LogRecord::StepSlow {
            step: "1",
            title: "Build",
            elapsed_ms: 20.0,
            threshold_ms: 10.0,
        };

        assert_eq!(begin.severity(), Severity::Information);
        assert_eq!(slow.severity(), Severity::Warning);
    }

    #[test]
    fn render_includes_step_and_title() {
        let done = LogRecord::StepDone {
            step: "2.1",
            title: "Compile",
            elapsed_ms: 5.0,
        };
        assert_eq!(done.render(), "2.1 DONE: Compile (5ms)");

        let begin = LogRecord::StepBegin {
            step: "2",
            title: "Deploy",
        };
        assert_eq!(begin.render(), "2 BEGIN: Deploy");
    }

    #[test]
    fn memory_sink_captures_fields() {
        let sink = MemorySink::new();
        sink.record(&LogRecord::StepSlow {
            step: "3",
            title: "Upload",
            elapsed_ms: 1500.0,
            threshold_ms: 1000.0,
        });

        let records = sink.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.kind, RecordKind::StepSlow);
        assert_eq!(record.step.as_deref(), Some("3"));
        assert_eq!(record.title.as_deref(), Some("Upload"));
        assert_eq!(record.elapsed_ms, Some(1500.0));
        assert_eq!(record.threshold_ms, Some(1000.0));
    }

    #[test]
    fn memory_sink_keeps_message_text_verbatim() {
        let sink = MemorySink::new();
        sink.record(&LogRecord::Message {
            severity: Severity::Error,
            text: "disk {full}",
        });

        let record = &sink.records()[0];
        assert_eq!(record.kind, RecordKind::Message);
        assert_eq!(record.severity, Severity::Error);
        assert_eq!(record.text, "disk {full}");
        assert!(record.step.is_none());
    }

    #[test]
    fn of_kind_filters_records() {
        let sink = MemorySink::new();
        sink.record(&LogRecord::StepBegin {
            step: "1",
            title: "A",
        });
        sink.record(&LogRecord::Message {
            severity: Severity::Information,
            text: "hi",
        });

        assert_eq!(sink.of_kind(RecordKind::StepBegin).len(), 1);
        assert_eq!(sink.of_kind(RecordKind::StepDone).len(), 0);
        assert!(!sink.is_empty());
    }

    #[test]
    fn tracing_sink_without_subscriber_is_a_no_op() {
        TracingSink.record(&LogRecord::Message {
            severity: Severity::Critical,
            text: "nobody listening",
        });
    }
}
