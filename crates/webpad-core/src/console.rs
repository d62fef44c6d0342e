//! Run console model.
//!
//! Output captured while running the active file, plus status messages
//! from the shell itself (import results, persistence failures).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::CONSOLE_CAPACITY;

/// Severity of a console line. Mirrors the captured `console.*` methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsoleLevel {
    Log,
    Info,
    Warn,
    Error,
    /// Shell status (e.g. "Project imported")
    Success,
}

impl ConsoleLevel {
    /// Map a `console` method name; unknown names log.
    pub fn from_method(method: &str) -> Self {
        match method {
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Log,
        }
    }

    /// Marker shown before the line.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Log => "📋",
            Self::Info => "ℹ️",
            Self::Warn => "⚠️",
            Self::Error => "❌",
            Self::Success => "✅",
        }
    }
}

/// One console line with a unique id for keyed rendering.
#[derive(Clone, Debug)]
pub struct ConsoleLine {
    pub id: usize,
    pub level: ConsoleLevel,
    pub text: String,
}

static CONSOLE_LINE_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl ConsoleLine {
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            id: CONSOLE_LINE_COUNTER.fetch_add(1, Ordering::Relaxed),
            level,
            text: text.into(),
        }
    }

    /// Join already-formatted arguments with single spaces, like `console.log`.
    pub fn from_args<S: AsRef<str>>(level: ConsoleLevel, args: &[S]) -> Self {
        let text = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        Self::new(level, text)
    }

    pub fn log(text: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Log, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Error, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Success, text)
    }
}

impl PartialEq for ConsoleLine {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.text == other.text
    }
}

/// Bounded console history, oldest first.
#[derive(Clone, Debug)]
pub struct Console {
    lines: VecDeque<ConsoleLine>,
    capacity: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::with_capacity(CONSOLE_CAPACITY)
    }
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, line: ConsoleLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &ConsoleLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_method() {
        assert_eq!(ConsoleLevel::from_method("warn"), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::from_method("error"), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::from_method("debug"), ConsoleLevel::Log);
    }

    #[test]
    fn test_from_args_joins_with_spaces() {
        let line = ConsoleLine::from_args(ConsoleLevel::Log, &["a", "1", "{\"k\":2}"]);
        assert_eq!(line.text, "a 1 {\"k\":2}");
        assert_eq!(ConsoleLine::from_args::<&str>(ConsoleLevel::Info, &[]).text, "");
    }

    #[test]
    fn test_unique_ids() {
        let a = ConsoleLine::log("same");
        let b = ConsoleLine::log("same");
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_console_drops_oldest() {
        let mut console = Console::with_capacity(2);
        console.push(ConsoleLine::log("1"));
        console.push(ConsoleLine::log("2"));
        console.push(ConsoleLine::error("3"));

        let texts: Vec<_> = console.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "3"]);

        console.clear();
        assert!(console.is_empty());
    }
}
