//! Observability metrics for sampling.
//!
//! Suppressed calls leave no trace in log output. These counters are the only
//! place suppression is visible.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking sampling statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Calls forwarded to the sink
    events_forwarded: AtomicU64,
    /// Calls dropped by the count throttle
    suppressed_by_count: AtomicU64,
    /// Calls dropped by the time throttle
    suppressed_by_time: AtomicU64,
    /// Calls with an empty format string
    events_skipped: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    pub(crate) fn record_forwarded(&self) {
        self.inner.events_forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed_by_count(&self) {
        self.inner
            .suppressed_by_count
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed_by_time(&self) {
        self.inner.suppressed_by_time.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped(&self) {
        self.inner.events_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of calls forwarded to the sink.
    pub fn events_forwarded(&self) -> u64 {
        self.inner.events_forwarded.load(Ordering::Relaxed)
    }

    /// Get the total number of calls suppressed by either throttle.
    pub fn events_suppressed(&self) -> u64 {
        self.suppressed_by_count()
            .saturating_add(self.suppressed_by_time())
    }

    /// Get the number of calls suppressed by the count throttle.
    pub fn suppressed_by_count(&self) -> u64 {
        self.inner.suppressed_by_count.load(Ordering::Relaxed)
    }

    /// Get the number of calls suppressed by the time throttle.
    pub fn suppressed_by_time(&self) -> u64 {
        self.inner.suppressed_by_time.load(Ordering::Relaxed)
    }

    /// Get the number of calls skipped because their format string was empty.
    pub fn events_skipped(&self) -> u64 {
        self.inner.events_skipped.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_forwarded: self.events_forwarded(),
            suppressed_by_count: self.suppressed_by_count(),
            suppressed_by_time: self.suppressed_by_time(),
            events_skipped: self.events_skipped(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.inner.events_forwarded.store(0, Ordering::Relaxed);
        self.inner.suppressed_by_count.store(0, Ordering::Relaxed);
        self.inner.suppressed_by_time.store(0, Ordering::Relaxed);
        self.inner.events_skipped.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Calls forwarded to the sink
    pub events_forwarded: u64,
    /// Calls dropped by the count throttle
    pub suppressed_by_count: u64,
    /// Calls dropped by the time throttle
    pub suppressed_by_time: u64,
    /// Calls with an empty format string
    pub events_skipped: u64,
}

impl MetricsSnapshot {
    /// Total suppressed calls.
    pub fn events_suppressed(&self) -> u64 {
        self.suppressed_by_count
            .saturating_add(self.suppressed_by_time)
    }

    /// Calls that reached a sampling decision (forwarded + suppressed).
    pub fn total_sampled(&self) -> u64 {
        self.events_forwarded
            .saturating_add(self.events_suppressed())
    }

    /// Calculate the suppression rate (0.0 to 1.0).
    ///
    /// Returns 0.0 if no calls have been sampled.
    pub fn suppression_rate(&self) -> f64 {
        let total = self.total_sampled();
        if total == 0 {
            0.0
        } else {
            self.events_suppressed() as f64 / total as f64
        }
    }
}
