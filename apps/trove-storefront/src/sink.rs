//! Browser console output for the client logger.

use leptos::logging::{error, log, warn};
use trove_observability::{LogEntry, LogFormat, LogLevel, LogSink};

pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry, format: LogFormat) {
        let line = match format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        match entry.level {
            LogLevel::Error => error!("{line}"),
            LogLevel::Warn => warn!("{line}"),
            _ => log!("{line}"),
        }
    }
}
