use std::collections::VecDeque;

/// Severity of a captured line. `console.log` maps to `Info`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Class suffix used to colour the line in the Logs view.
    #[inline]
    pub fn class_suffix(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Name of the `console` method this level wraps.
    #[inline]
    pub fn console_method(self) -> &'static str {
        match self {
            LogLevel::Info => "log",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub const ALL: [LogLevel; 3] = [LogLevel::Info, LogLevel::Warn, LogLevel::Error];
}

/// One formatted line. Entries are never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    level: LogLevel,
    text: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Extract `HH:MM:SS.mmm` from an ISO-8601 timestamp such as
/// `2024-05-01T12:34:56.789Z`. Input without a `T` separator is returned as is.
pub fn time_of_day(iso: &str) -> &str {
    match iso.split_once('T') {
        Some((_, time)) => time.trim_end_matches('Z'),
        None => iso,
    }
}

/// Build the display text for one log call: `[time] part part ...`.
pub fn format_line<S: AsRef<str>>(iso: &str, parts: &[S]) -> String {
    let mut line = format!("[{}]", time_of_day(iso));
    for part in parts {
        line.push(' ');
        line.push_str(part.as_ref());
    }
    line
}

/// Bounded, append-only log store with oldest-first eviction.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, returning the evicted one when the buffer was full.
    pub fn push(&mut self, entry: LogEntry) -> Option<LogEntry> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// The newest `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(crate::constants::MAX_LOGS)
    }
}
