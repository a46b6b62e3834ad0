//! Visual output sink.

use colored::{Color, Colorize};
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for pre-formatted console lines.
///
/// `color` is `None` for blank separator lines.
pub trait Console: Send + Sync {
    fn write_line(&self, text: &str, color: Option<Color>);
}

/// Writes lines to stdout, colorized unless disabled.
#[derive(Clone, Copy, Debug)]
pub struct TerminalConsole {
    colorize: bool,
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TerminalConsole {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }
}

impl Console for TerminalConsole {
    fn write_line(&self, text: &str, color: Option<Color>) {
        match color {
            Some(color) if self.colorize => println!("{}", text.color(color)),
            _ => println!("{text}"),
        }
    }
}

/// A line captured by [`BufferConsole`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleLine {
    pub text: String,
    pub color: Option<Color>,
}

/// In-memory console that keeps every line written to it.
///
/// Clones share the same buffer, so one clone can be handed to a tracker
/// while another is inspected.
///
/// # Example
///
/// ```rust
/// use steplog::sink::{BufferConsole, Console};
/// use colored::Color;
///
/// let console = BufferConsole::new();
/// console.write_line("hello", Some(Color::Green));
/// assert_eq!(console.texts(), vec!["hello".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BufferConsole {
    lines: Arc<Mutex<Vec<ConsoleLine>>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<ConsoleLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Text of every captured line, blank lines included.
    pub fn texts(&self) -> Vec<String> {
        self.lines().into_iter().map(|line| line.text).collect()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Console for BufferConsole {
    fn write_line(&self, text: &str, color: Option<Color>) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ConsoleLine {
                text: text.to_string(),
                color,
            });
    }
}

impl<C: Console + ?Sized> Console for Arc<C> {
    fn write_line(&self, text: &str, color: Option<Color>) {
        (**self).write_line(text, color);
    }
}
