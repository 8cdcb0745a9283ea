//! Elapsed-time logging around a closure.
//!
//! ```
//! use tracing_labeled_logs::{Logs, Severity};
//! use std::time::Duration;
//!
//! let logs = Logs::new();
//! let rows = logs
//!     .watch(Severity::Info, "load rows", Some(Duration::from_millis(200)), || 42)
//!     .unwrap();
//! assert_eq!(rows, 42);
//! ```

use crate::application::logger::Logs;
use crate::application::ports::Storage;
use crate::domain::{call::LogCallSpec, rate_key::RateKey, severity::Severity};
use std::fmt;
use std::time::{Duration, Instant};

/// Error returned by [`Logs::watch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    /// The task name was empty
    EmptyTaskName,
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchError::EmptyTaskName => write!(f, "[TimeWatcher] taskName must not be empty"),
        }
    }
}

impl std::error::Error for WatchError {}

impl<S> Logs<S>
where
    S: Storage<RateKey, u64> + Clone,
{
    /// Run `task`, logging its running time at `level` when it took longer than
    /// `threshold`.
    ///
    /// The comparison is at full precision and `None` means zero, so without a
    /// threshold every task is reported, fast ones included.
    ///
    /// Running time is reported in milliseconds, or in microseconds when under
    /// one millisecond. The task's result is returned either way.
    ///
    /// # Errors
    /// Returns `WatchError::EmptyTaskName` without running the task if
    /// `task_name` is empty.
    pub fn watch<T, F>(
        &self,
        level: Severity,
        task_name: &str,
        threshold: Option<Duration>,
        task: F,
    ) -> Result<T, WatchError>
    where
        F: FnOnce() -> T,
    {
        if task_name.is_empty() {
            return Err(WatchError::EmptyTaskName);
        }
        let threshold = threshold.unwrap_or(Duration::ZERO);

        let start = Instant::now();
        let result = task();
        let elapsed = start.elapsed();

        if elapsed > threshold {
            self.report(level, task_name, elapsed);
        }
        Ok(result)
    }

    fn report(&self, level: Severity, task_name: &str, elapsed: Duration) {
        let spec = LogCallSpec::new();
        let millis = elapsed.as_millis();
        if millis == 0 {
            let micros = elapsed.as_micros();
            self.log(
                &spec,
                level,
                "[TimeWatcher] [{}] running time : {}us",
                &[&task_name, &micros],
            );
        } else {
            self.log(
                &spec,
                level,
                "[TimeWatcher] [{}] running time : {}ms",
                &[&task_name, &millis],
            );
        }
    }
}
