//! Per-call configuration and message prefix composition.

use crate::domain::policy::{CountSampling, TimeSampling};
use std::time::Duration;

/// Configuration attached to one logical log statement.
///
/// Holds everything except the format string, level, and arguments, which are
/// supplied by the terminal emit call. A default spec has no labels and no
/// sampling, so it never suppresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCallSpec {
    labels: Vec<String>,
    rate_count: u32,
    rate_time: Option<Duration>,
}

impl LogCallSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the label list.
    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Emit only every Nth call. Zero disables count sampling.
    pub fn with_rate_count(mut self, every: u32) -> Self {
        self.rate_count = every;
        self
    }

    /// Emit at most once per interval. A zero interval disables time sampling.
    pub fn with_rate_time(mut self, min_interval: Duration) -> Self {
        self.rate_time = Some(min_interval);
        self
    }

    /// Configured labels, in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Configured count threshold (0 when unset).
    pub fn rate_count(&self) -> u32 {
        self.rate_count
    }

    /// Configured minimum interval, if any.
    pub fn rate_time(&self) -> Option<Duration> {
        self.rate_time
    }

    /// Count policy, if count sampling is enabled.
    pub fn count_sampling(&self) -> Option<CountSampling> {
        CountSampling::new(self.rate_count)
    }

    /// Time policy, if time sampling is enabled.
    pub fn time_sampling(&self) -> Option<TimeSampling> {
        self.rate_time.and_then(TimeSampling::new)
    }

    /// Whether any throttle applies to this call.
    pub fn is_sampled(&self) -> bool {
        self.count_sampling().is_some() || self.time_sampling().is_some()
    }

    /// Build the format string forwarded to the sink.
    ///
    /// Prefixes, in order: `[rateCount-N] `, `[rateTime-Tms] `, then each label as
    /// `[label] `, then the raw format. The time marker is printed whenever an
    /// interval was set, even one too short to sample.
    pub fn compose(&self, format: &str) -> String {
        let mut composed = String::with_capacity(format.len() + 16 * (self.labels.len() + 2));
        if let Some(count) = self.count_sampling() {
            composed.push_str(&format!("[rateCount-{}] ", count.every()));
        }
        if let Some(interval) = self.rate_time {
            composed.push_str(&format!("[rateTime-{}ms] ", interval.as_millis()));
        }
        for label in &self.labels {
            composed.push('[');
            composed.push_str(label);
            composed.push_str("] ");
        }
        composed.push_str(format);
        composed
    }
}
