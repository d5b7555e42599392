//! Structured logging with session and screen context.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::session::SessionId;
use crate::sink::{LogSink, StderrSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a sink renders an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// `[LEVEL] Screen: message (123us) | k=v`
    Human,
}

/// One log line, as handed to a [`LogSink`].
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub session_id: String,
    /// Route name of the screen that was on top when the entry was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    pub fn to_human(&self) -> String {
        let mut line = format!("[{}]", self.level);
        if let Some(screen) = &self.screen {
            let _ = write!(line, " {screen}:");
        }
        let _ = write!(line, " {}", self.message);
        if let Some(us) = self.elapsed_us {
            let _ = write!(line, " ({us}us)");
        }
        // BTreeMap keeps the pairs sorted by key.
        for (i, (key, value)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " | " } else { " " };
            let _ = write!(line, "{sep}{key}={value}");
        }
        line
    }

    /// A string field's value, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Structured logger for one client session.
///
/// Clones share the sink. The storefront driver scopes a clone to the
/// current screen with [`ClientLogger::for_screen`] before each entry.
///
/// ```rust,ignore
/// logger
///     .error("request failed")
///     .field("endpoint", "/api/cart")
///     .field("transient", true)
///     .emit();
/// ```
#[derive(Clone)]
pub struct ClientLogger {
    session_id: SessionId,
    screen: Option<String>,
    route: Option<String>,
    created: Option<Stopwatch>,
    min_level: LogLevel,
    format: LogFormat,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for ClientLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientLogger")
            .field("session_id", &self.session_id)
            .field("screen", &self.screen)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

impl Default for ClientLogger {
    fn default() -> Self {
        Self::new(SessionId::generate())
    }
}

impl ClientLogger {
    /// JSON lines on stderr, info and above.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            screen: None,
            route: None,
            created: Stopwatch::start(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: Arc::new(StderrSink),
        }
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Self::new(SessionId::from_string("disabled")).with_sink(Arc::new(NullSink))
    }

    pub fn with_screen(mut self, screen: impl Into<String>) -> Self {
        self.screen = Some(screen.into());
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn for_screen(&self, screen: impl Into<String>) -> Self {
        self.clone().with_screen(screen)
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn at(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn trace(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Info, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Warn, message)
    }

    pub fn error(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Error, message)
    }

    fn write(&self, level: LogLevel, message: String, fields: BTreeMap<String, Value>) {
        if !self.enabled(level) {
            return;
        }
        let entry = LogEntry {
            level,
            message,
            session_id: self.session_id.to_string(),
            screen: self.screen.clone(),
            route: self.route.clone(),
            fields,
            elapsed_us: self.created.map(|watch| watch.elapsed().as_micros() as u64),
        };
        self.sink.write(&entry, self.format);
    }
}

/// An entry being assembled; nothing is written until [`LogBuilder::emit`].
#[must_use = "call `emit` to write the entry"]
pub struct LogBuilder<'a> {
    logger: &'a ClientLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, Value>,
}

impl LogBuilder<'_> {
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn duration_ms(self, key: &str, duration: Duration) -> Self {
        self.field(key, duration.as_millis() as u64)
    }

    /// Time since `started`, or nothing when it was never measured.
    pub fn elapsed_ms(self, key: &str, started: Option<Stopwatch>) -> Self {
        match started {
            Some(watch) => self.duration_ms(key, watch.elapsed()),
            None => self,
        }
    }

    pub fn emit(self) {
        self.logger.write(self.level, self.message, self.fields);
    }
}

struct NullSink;

impl LogSink for NullSink {
    fn write(&self, _entry: &LogEntry, _format: LogFormat) {}
}

/// Monotonic start point for timing requests.
///
/// `start` yields `None` in the browser, where timings are simply omitted.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch(std::time::Instant);

impl Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start() -> Option<Self> {
        Some(Stopwatch(std::time::Instant::now()))
    }

    // `Instant::now` panics on wasm32-unknown-unknown.
    #[cfg(target_arch = "wasm32")]
    pub fn start() -> Option<Self> {
        None
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}
