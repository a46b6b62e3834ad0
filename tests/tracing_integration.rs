//! The tracing-backed sink and spans, observed through a fmt subscriber.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use steplog::{BufferConsole, Emit, Level, StepOptions, StepTracker, TracingSink, TracingSpans};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    buf.contents()
}

fn tracker() -> StepTracker {
    StepTracker::builder()
        .console(BufferConsole::new())
        .log_sink(TracingSink)
        .spans(TracingSpans)
        .build()
}

#[test]
fn step_lifecycle_is_logged_with_fields() {
    let output = capture(|| {
        let tracker = tracker();
        let _step = tracker.begin_step_with("Build", StepOptions::new().log(true));
    });

    assert!(output.contains("step begin"));
    assert!(output.contains("step done"));
    assert!(output.contains("title=Build"));
    assert!(output.contains("step=1"));
}

#[test]
fn slow_step_is_logged_as_warning() {
    let output = capture(|| {
        let tracker = tracker();
        let _step = tracker.begin_step_with(
            "Sleepy",
            StepOptions::new()
                .threshold(Duration::from_millis(1))
                .log(true),
        );
        std::thread::sleep(Duration::from_millis(20));
    });

    assert!(output.contains("WARN"));
    assert!(output.contains("step exceeded threshold"));
    assert!(output.contains("threshold_ms=1"));
}

#[test]
fn leveled_messages_map_to_tracing_levels() {
    let output = capture(|| {
        let tracker = tracker();
        tracker.debug("debug text");
        tracker.error("error text");
        tracker.critical("critical text");
        tracker
            .emit(Level::Success, "success text", Emit::new().log(true))
            .unwrap();
    });

    assert!(output.contains("DEBUG"));
    assert!(output.contains("debug text"));
    assert!(output.contains("ERROR"));
    assert!(output.contains("error text"));
    assert!(output.contains("critical=true"));
    assert!(output.contains("INFO"));
    assert!(output.contains("success text"));
}

#[test]
fn unlogged_success_stays_off_the_log() {
    let output = capture(|| {
        tracker().success("quiet");
    });

    assert!(!output.contains("quiet"));
}
