//! Log destinations.

use std::sync::Mutex;

use crate::logging::{LogEntry, LogFormat, LogLevel};

/// Receives every entry that passes the logger's level filter.
pub trait LogSink: Send + Sync {
    fn write(&self, entry: &LogEntry, format: LogFormat);
}

/// Writes one line per entry to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, entry: &LogEntry, format: LogFormat) {
        let output = match format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        eprintln!("{}", output);
    }
}

/// Forwards entries to the `tracing` dispatcher.
///
/// Formatting is left to whichever subscriber is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, entry: &LogEntry, _format: LogFormat) {
        let session = entry.session_id.as_str();
        let screen = entry.screen.as_deref().unwrap_or("-");
        let fields = if entry.fields.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&entry.fields).unwrap_or_default()
        };
        let message = entry.message.as_str();

        match entry.level {
            LogLevel::Trace => {
                tracing::trace!(target: "trove", session, screen, fields = %fields, "{message}")
            }
            LogLevel::Debug => {
                tracing::debug!(target: "trove", session, screen, fields = %fields, "{message}")
            }
            LogLevel::Info => {
                tracing::info!(target: "trove", session, screen, fields = %fields, "{message}")
            }
            LogLevel::Warn => {
                tracing::warn!(target: "trove", session, screen, fields = %fields, "{message}")
            }
            LogLevel::Error => {
                tracing::error!(target: "trove", session, screen, fields = %fields, "{message}")
            }
        }
    }
}

/// Keeps entries in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    /// Entries at exactly `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, _format: LogFormat) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
    }
}
