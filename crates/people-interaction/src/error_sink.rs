//! Process-wide sinks for HTTP failure diagnostics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// Receives one diagnostic line per failed request.
///
/// Implementations must not panic; reports are fire-and-forget.
pub trait ErrorSink: Send + Sync {
    fn handle_error(&self, message: &str);
}

/// Default sink forwarding reports to `tracing` at ERROR level.
#[derive(Debug, Clone, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn handle_error(&self, message: &str) {
        tracing::error!(target: "people_interaction::http", "{}", message);
    }
}

/// A recorded diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub reported_at: DateTime<Utc>,
}

/// Sink that keeps every report in memory, for UIs that surface them and for tests.
#[derive(Debug, Default)]
pub struct MemoryErrorSink {
    reports: Mutex<Vec<ErrorReport>>,
}

impl MemoryErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all reports, oldest first.
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns only the messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.reports().into_iter().map(|r| r.message).collect()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ErrorSink for MemoryErrorSink {
    fn handle_error(&self, message: &str) {
        let report = ErrorReport {
            message: message.to_string(),
            reported_at: Utc::now(),
        };
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
    }
}
