//! Recording sink for testing.

use crate::application::ports::Sink;
use crate::domain::severity::Severity;
use crate::infrastructure::format::render;
use std::fmt::Display;
use std::sync::{Arc, Mutex};

/// Sink that records every forwarded call.
///
/// Clones share the same record, so a test can keep one clone and hand the
/// other to [`Logs`](crate::Logs).
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    captured: Arc<Mutex<Vec<CapturedCall>>>,
}

/// A call as the sink received it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CapturedCall {
    pub level: Severity,
    /// Composed format, placeholders intact
    pub format: String,
    /// Format with arguments substituted
    pub message: String,
}

impl MockSink {
    /// Create a new recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured calls.
    pub fn get_captured(&self) -> Vec<CapturedCall> {
        self.captured
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    /// Get the count of captured calls.
    pub fn count(&self) -> usize {
        self.captured
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .len()
    }

    /// Clear all captured calls.
    pub fn clear(&self) {
        self.captured
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .clear();
    }

    fn record(&self, level: Severity, format: &str, arguments: &[&dyn Display]) {
        let call = CapturedCall {
            level,
            format: format.to_string(),
            message: render(format, arguments),
        };
        self.captured
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .push(call);
    }
}

impl Sink for MockSink {
    fn trace(&self, format: &str, arguments: &[&dyn Display]) {
        self.record(Severity::Trace, format, arguments);
    }

    fn debug(&self, format: &str, arguments: &[&dyn Display]) {
        self.record(Severity::Debug, format, arguments);
    }

    fn info(&self, format: &str, arguments: &[&dyn Display]) {
        self.record(Severity::Info, format, arguments);
    }

    fn warn(&self, format: &str, arguments: &[&dyn Display]) {
        self.record(Severity::Warn, format, arguments);
    }

    fn error(&self, format: &str, arguments: &[&dyn Display]) {
        self.record(Severity::Error, format, arguments);
    }
}
