use std::sync::Mutex;

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub event: String,
    pub details: Value,
}

/// Sink for diagnostics and directory listings. Never part of the return value.
pub trait OperationalLog {
    fn record(&self, entry: LogEntry);

    fn info(&self, event: &str, details: Value) {
        self.record(LogEntry {
            level: LogLevel::Info,
            event: event.to_string(),
            details,
        });
    }

    fn error(&self, event: &str, details: Value) {
        self.record(LogEntry {
            level: LogLevel::Error,
            event: event.to_string(),
            details,
        });
    }
}

/// One JSON object per line on stderr, picked up by CloudWatch.
#[derive(Debug, Clone)]
pub struct JsonStderrLog {
    component: &'static str,
}

impl JsonStderrLog {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl OperationalLog for JsonStderrLog {
    fn record(&self, entry: LogEntry) {
        eprintln!("{}", render_line(self.component, &entry));
    }
}

fn render_line(component: &str, entry: &LogEntry) -> Value {
    match entry.level {
        LogLevel::Info => json!({
            "component": component,
            "event": entry.event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": entry.details,
        }),
        LogLevel::Error => json!({
            "component": component,
            "level": "error",
            "event": entry.event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": entry.details,
        }),
    }
}

/// Keeps entries in memory; used by tests and local dry runs.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| entry.event)
            .collect()
    }

    pub fn errors(&self) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .collect()
    }
}

impl OperationalLog for MemoryLog {
    fn record(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}
