//! Emission levels and their presentation.

use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown by the success emitter when the caller gives none.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "✔ Done";

/// Severity forwarded to the structured log sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Level of a leveled message.
///
/// `Message` carries a caller-chosen color and renders without a tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Success,
    Message(Color),
}

impl Level {
    /// Tag rendered in front of the message, if any.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Trace => Some("trace"),
            Self::Debug => Some("dbg"),
            Self::Info => Some("⟳"),
            Self::Warning => Some("⚠️"),
            Self::Error => Some("❌"),
            Self::Critical => Some("🔥"),
            Self::Success => Some("✔"),
            Self::Message(_) => None,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Trace => Color::Cyan,
            Self::Debug => Color::BrightBlack,
            Self::Info => Color::White,
            Self::Warning => Color::Yellow,
            Self::Error | Self::Critical => Color::Red,
            Self::Success => Color::Green,
            Self::Message(color) => *color,
        }
    }

    /// Severity used when the message is forwarded to the log sink.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Trace => Severity::Trace,
            Self::Debug => Severity::Debug,
            Self::Info | Self::Success | Self::Message(_) => Severity::Information,
            Self::Warning => Severity::Warning,
            Self::Error => Severity::Error,
            Self::Critical => Severity::Critical,
        }
    }

    /// Whether the message goes to the log sink when the caller does not say.
    pub fn logs_by_default(&self) -> bool {
        !matches!(self, Self::Success | Self::Message(_))
    }

    /// Error and critical emissions produce an invalid outcome; every other
    /// level is informational.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Error | Self::Critical)
    }

    /// Message text as shown on the console, without indentation.
    pub fn decorate(&self, message: &str) -> String {
        match self.tag() {
            Some(tag) => format!("[{tag}] {message}"),
            None => message.to_string(),
        }
    }
}
