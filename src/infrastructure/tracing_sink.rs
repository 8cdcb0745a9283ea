//! Sink adapter for the `tracing` ecosystem.
//!
//! Renders the composed format and emits one `tracing` event per forwarded call,
//! under the `tracing_labeled_logs` target. Rendering is skipped when the level
//! is disabled for that target.

use crate::application::ports::Sink;
use crate::infrastructure::format::render;
use std::fmt::Display;

/// Forwards log calls to the current `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

macro_rules! forward {
    ($level:expr, $event:ident, $format:expr, $arguments:expr) => {
        if tracing::enabled!(target: "tracing_labeled_logs", $level) {
            let message = render($format, $arguments);
            tracing::$event!(target: "tracing_labeled_logs", "{}", message);
        }
    };
}

impl Sink for TracingSink {
    fn trace(&self, format: &str, arguments: &[&dyn Display]) {
        forward!(tracing::Level::TRACE, trace, format, arguments);
    }

    fn debug(&self, format: &str, arguments: &[&dyn Display]) {
        forward!(tracing::Level::DEBUG, debug, format, arguments);
    }

    fn info(&self, format: &str, arguments: &[&dyn Display]) {
        forward!(tracing::Level::INFO, info, format, arguments);
    }

    fn warn(&self, format: &str, arguments: &[&dyn Display]) {
        forward!(tracing::Level::WARN, warn, format, arguments);
    }

    fn error(&self, format: &str, arguments: &[&dyn Display]) {
        forward!(tracing::Level::ERROR, error, format, arguments);
    }
}
