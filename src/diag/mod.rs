//! Clearable diagnostic log trail.
//!
//! Long-running flows (bootstrap in particular) append here so the UI can
//! show a support-friendly trail of what happened. Every entry is also
//! mirrored to the `tracing` subscriber, so operators get the same story
//! in structured logs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

/// One diagnostic entry: free text plus optional structured context
/// (request URL, serialized payload) for transport errors.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    pub at: DateTime<Utc>,
}

/// Shared, clearable in-memory log.
///
/// Cloning is cheap; all clones append to the same trail.
#[derive(Clone, Default)]
pub struct DiagnosticLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the prior trail. Bootstrap calls this on every fresh attempt.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.push(LogLevel::Info, message, None);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.push(LogLevel::Error, message, None);
    }

    /// Error entry with structured context, for transport failures that
    /// carry a URL and a response body worth keeping.
    pub fn error_with(&self, message: impl Into<String>, context: serde_json::Value) {
        let message = message.into();
        error!(context = %context, "{}", message);
        self.push(LogLevel::Error, message, Some(context));
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn push(&self, level: LogLevel, message: String, context: Option<serde_json::Value>) {
        self.entries.lock().unwrap().push(LogEntry {
            level,
            message,
            context,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_records_and_clears() {
        let log = DiagnosticLog::new();
        log.info("starting");
        log.error_with("fetch failed", serde_json::json!({ "url": "https://x" }));

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[1].level, LogLevel::Error);
        assert!(entries[1].context.is_some());

        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_clones_share_the_trail() {
        let log = DiagnosticLog::new();
        let clone = log.clone();
        clone.info("from clone");
        assert_eq!(log.entries().len(), 1);
    }
}
