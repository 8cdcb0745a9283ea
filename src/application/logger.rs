//! Labeled, sampled logging.
//!
//! [`Logs`] is the throttling context: it owns the shared sampling state and the
//! sink. [`LogCall`] is the per-statement builder obtained from it. A call is
//! configured in any order, then finished by exactly one of the five severity
//! methods:
//!
//! ```
//! use tracing_labeled_logs::Logs;
//! use std::time::Duration;
//!
//! let logs = Logs::new();
//!
//! logs.labels(["db", "pool"]).warn("connection {} refused", &[&"primary"]);
//!
//! for attempt in 0..100 {
//!     // Forwarded on attempts 0, 10, 20, ...
//!     logs.rate_count(10).info("retrying, attempt {}", &[&attempt]);
//! }
//!
//! logs.rate_time(Duration::from_secs(5)).error("upstream unavailable", &[]);
//! ```

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, Sink, Storage};
use crate::application::registry::ThrottleRegistry;
use crate::application::sampler::Sampler;
use crate::domain::{call::LogCallSpec, rate_key::RateKey, severity::Severity};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::ShardedStorage;
use crate::infrastructure::tracing_sink::TracingSink;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;

/// Storage used by [`Logs::new`] and [`Logs::builder`].
pub type DefaultStorage = Arc<ShardedStorage<RateKey, u64>>;

/// What happened to a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Handed to the sink
    Forwarded,
    /// Dropped by a throttle
    Suppressed,
    /// Empty format string, nothing to log
    Skipped,
}

/// Builder for constructing a [`Logs`] handle.
#[derive(Default)]
pub struct LogsBuilder {
    sink: Option<Arc<dyn Sink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LogsBuilder {
    /// Set the backend sink. Defaults to [`TracingSink`].
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set a custom clock (mainly for testing). Defaults to [`SystemClock`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the handle with fresh, empty throttle state.
    pub fn build(self) -> Logs {
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        Logs::with_storage(
            Arc::new(ShardedStorage::new()),
            Arc::new(ShardedStorage::new()),
            clock,
            sink,
        )
    }
}

/// Throttling context and logging entry point.
///
/// Cloning is cheap; clones share throttle state, metrics, and sink. Create one
/// per process (see [`crate::global`]) or one per test for isolation.
#[derive(Clone)]
pub struct Logs<S = DefaultStorage>
where
    S: Storage<RateKey, u64> + Clone,
{
    sampler: Sampler<S>,
    sink: Arc<dyn Sink>,
}

impl Logs<DefaultStorage> {
    /// Create a builder for configuring the handle.
    ///
    /// Defaults:
    /// - Sink: [`TracingSink`]
    /// - Clock: [`SystemClock`]
    /// - Storage: in-memory sharded maps, no eviction
    pub fn builder() -> LogsBuilder {
        LogsBuilder::default()
    }

    /// Create a handle with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a handle with custom storage backends.
    ///
    /// # Arguments
    /// * `counts` - Map for invocation counters
    /// * `last_emits` - Map for last emission timestamps
    /// * `clock` - Clock used by time sampling
    /// * `sink` - Backend receiving forwarded calls
    pub fn with_storage<ST>(
        counts: ST,
        last_emits: ST,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn Sink>,
    ) -> Logs<ST>
    where
        ST: Storage<RateKey, u64> + Clone,
    {
        let registry = ThrottleRegistry::new(counts, last_emits, clock);
        Logs {
            sampler: Sampler::new(registry, Metrics::new()),
            sink,
        }
    }
}

impl Default for Logs<DefaultStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Logs<S>
where
    S: Storage<RateKey, u64> + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logs")
            .field("sink", &self.sink)
            .field("count_keys", &self.sampler.registry().count_keys())
            .field("time_keys", &self.sampler.registry().time_keys())
            .finish()
    }
}

impl<S> Logs<S>
where
    S: Storage<RateKey, u64> + Clone,
{
    /// Start an unconfigured call.
    pub fn call(&self) -> LogCall<'_, S> {
        LogCall {
            logs: self,
            spec: LogCallSpec::new(),
        }
    }

    /// Start a call from an existing configuration.
    pub fn with_spec(&self, spec: LogCallSpec) -> LogCall<'_, S> {
        LogCall { logs: self, spec }
    }

    /// Start a call carrying labels.
    pub fn labels<I, L>(&self, labels: I) -> LogCall<'_, S>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.call().labels(labels)
    }

    /// Start a call carrying one label.
    pub fn label(&self, label: impl Into<String>) -> LogCall<'_, S> {
        self.call().label(label)
    }

    /// Start a call forwarded only every Nth time.
    pub fn rate_count(&self, every: u32) -> LogCall<'_, S> {
        self.call().rate_count(every)
    }

    /// Start a call forwarded at most once per interval.
    pub fn rate_time(&self, min_interval: Duration) -> LogCall<'_, S> {
        self.call().rate_time(min_interval)
    }

    pub fn trace(&self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.call().trace(format, arguments)
    }

    pub fn debug(&self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.call().debug(format, arguments)
    }

    pub fn info(&self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.call().info(format, arguments)
    }

    pub fn warn(&self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.call().warn(format, arguments)
    }

    pub fn error(&self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.call().error(format, arguments)
    }

    /// Sample, compose, and forward one call.
    ///
    /// An empty format is skipped before any throttle state is touched. The rate
    /// key is only derived when the spec enables sampling.
    ///
    /// # Panics
    /// Panics if an argument's `Display` implementation fails (see
    /// [`RateKey::derive`]).
    pub fn log(
        &self,
        spec: &LogCallSpec,
        level: Severity,
        format: &str,
        arguments: &[&dyn Display],
    ) -> Emission {
        if format.is_empty() {
            self.metrics().record_skipped();
            return Emission::Skipped;
        }

        if spec.is_sampled() {
            let key = RateKey::derive(format, level, arguments);
            if !self.sampler.check(key, spec).is_allow() {
                return Emission::Suppressed;
            }
        }

        let composed = spec.compose(format);
        self.sink.emit(level, &composed, arguments);
        self.metrics().record_forwarded();
        Emission::Forwarded
    }

    /// Get a reference to the metrics.
    pub fn metrics(&self) -> &Metrics {
        self.sampler.metrics()
    }

    /// Distinct keys tracked by the count and time maps.
    ///
    /// Both maps only grow; this is the number to watch if call sites log
    /// high-cardinality arguments under sampling.
    pub fn tracked_keys(&self) -> (usize, usize) {
        let registry = self.sampler.registry();
        (registry.count_keys(), registry.time_keys())
    }

    /// Get a reference to the sampler.
    pub fn sampler(&self) -> &Sampler<S> {
        &self.sampler
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }
}

/// A single log statement being configured.
///
/// Obtained from [`Logs`]; consumed by one of the five severity methods.
#[must_use = "a log call does nothing until a severity method is called"]
pub struct LogCall<'a, S = DefaultStorage>
where
    S: Storage<RateKey, u64> + Clone,
{
    logs: &'a Logs<S>,
    spec: LogCallSpec,
}

impl<'a, S> LogCall<'a, S>
where
    S: Storage<RateKey, u64> + Clone,
{
    /// Replace the labels.
    pub fn labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.spec = self.spec.with_labels(labels);
        self
    }

    /// Append a label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.spec = self.spec.with_label(label);
        self
    }

    /// Forward only every Nth call (1st, N+1th, ...). Zero disables.
    pub fn rate_count(mut self, every: u32) -> Self {
        self.spec = self.spec.with_rate_count(every);
        self
    }

    /// Forward at most once per interval. Zero disables.
    pub fn rate_time(mut self, min_interval: Duration) -> Self {
        self.spec = self.spec.with_rate_time(min_interval);
        self
    }

    /// The configuration collected so far.
    pub fn spec(&self) -> &LogCallSpec {
        &self.spec
    }

    pub fn trace(self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.emit(Severity::Trace, format, arguments)
    }

    pub fn debug(self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.emit(Severity::Debug, format, arguments)
    }

    pub fn info(self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.emit(Severity::Info, format, arguments)
    }

    pub fn warn(self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.emit(Severity::Warn, format, arguments)
    }

    pub fn error(self, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.emit(Severity::Error, format, arguments)
    }

    /// Finish the call at a level chosen at runtime.
    pub fn emit(self, level: Severity, format: &str, arguments: &[&dyn Display]) -> Emission {
        self.logs.log(&self.spec, level, format, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::{MockClock, MockSink};

    fn logs_with_mocks() -> (Logs, MockSink, Arc<MockClock>) {
        let sink = MockSink::new();
        let clock = Arc::new(MockClock::new(1_000_000));
        let logs = Logs::builder()
            .with_sink(Arc::new(sink.clone()))
            .with_clock(clock.clone())
            .build();
        (logs, sink, clock)
    }

    #[test]
    fn test_unconfigured_call_forwards_unchanged() {
        let (logs, sink, _) = logs_with_mocks();

        for _ in 0..5 {
            assert_eq!(logs.info("hello {}", &[&"world"]), Emission::Forwarded);
        }

        let captured = sink.get_captured();
        assert_eq!(captured.len(), 5);
        assert!(captured
            .iter()
            .all(|c| c.level == Severity::Info && c.format == "hello {}"));
        assert_eq!(captured[0].message, "hello world");
    }

    #[test]
    fn test_levels_are_routed() {
        let (logs, sink, _) = logs_with_mocks();

        logs.trace("t", &[]);
        logs.debug("d", &[]);
        logs.info("i", &[]);
        logs.warn("w", &[]);
        logs.error("e", &[]);

        let levels: Vec<Severity> = sink.get_captured().iter().map(|c| c.level).collect();
        assert_eq!(levels, Severity::ALL.to_vec());
    }

    #[test]
    fn test_empty_format_is_skipped() {
        let (logs, sink, _) = logs_with_mocks();

        assert_eq!(logs.labels(["x"]).error("", &[&1]), Emission::Skipped);
        assert_eq!(logs.rate_count(2).warn("", &[]), Emission::Skipped);

        assert_eq!(sink.count(), 0);
        assert_eq!(logs.metrics().events_skipped(), 2);
        assert_eq!(logs.tracked_keys(), (0, 0));
    }

    #[test]
    fn test_labels_and_markers_are_prepended() {
        let (logs, sink, _) = logs_with_mocks();

        logs.labels(["label 1", "label 2"])
            .rate_count(5)
            .rate_time(Duration::from_millis(250))
            .error("test log {} {}", &[&1.5, &"haha"]);

        let captured = sink.get_captured();
        assert_eq!(captured.len(), 1);
        assert_eq!(
            captured[0].format,
            "[rateCount-5] [rateTime-250ms] [label 1] [label 2] test log {} {}"
        );
        assert_eq!(
            captured[0].message,
            "[rateCount-5] [rateTime-250ms] [label 1] [label 2] test log 1.5 haha"
        );
    }

    #[test]
    fn test_rate_count_samples_every_nth() {
        let (logs, sink, _) = logs_with_mocks();

        let emissions: Vec<Emission> = (0..20)
            .map(|_| logs.rate_count(5).info("test rateCount", &[]))
            .collect();

        assert_eq!(sink.count(), 4);
        assert_eq!(
            emissions
                .iter()
                .filter(|e| **e == Emission::Suppressed)
                .count(),
            16
        );
        assert_eq!(emissions[0], Emission::Forwarded);
        assert_eq!(emissions[5], Emission::Forwarded);
    }

    #[test]
    fn test_rate_time_samples_by_interval() {
        let (logs, sink, clock) = logs_with_mocks();
        let interval = Duration::from_millis(1000);

        // One call every 100ms for 3 seconds
        for _ in 0..30 {
            logs.rate_time(interval).info("test rateTime", &[]);
            clock.advance_millis(100);
        }

        assert_eq!(sink.count(), 3);
        assert_eq!(logs.metrics().suppressed_by_time(), 27);
    }

    #[test]
    fn test_different_arguments_are_sampled_separately() {
        let (logs, sink, _) = logs_with_mocks();

        for user in ["alice", "bob"] {
            for _ in 0..3 {
                logs.rate_count(10).warn("login failed for {}", &[&user]);
            }
        }

        assert_eq!(sink.count(), 2);
        assert_eq!(logs.tracked_keys(), (2, 0));
    }

    #[test]
    fn test_same_text_different_level_is_sampled_separately() {
        let (logs, sink, _) = logs_with_mocks();

        for _ in 0..3 {
            logs.rate_count(10).info("same", &[]);
            logs.rate_count(10).warn("same", &[]);
        }

        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_labels_do_not_affect_rate_key() {
        let (logs, sink, _) = logs_with_mocks();

        logs.label("a").rate_count(3).info("shared", &[]);
        logs.label("b").rate_count(3).info("shared", &[]);
        logs.label("c").rate_count(3).info("shared", &[]);
        logs.label("d").rate_count(3).info("shared", &[]);

        let formats: Vec<String> = sink.get_captured().into_iter().map(|c| c.format).collect();
        assert_eq!(
            formats,
            vec!["[rateCount-3] [a] shared", "[rateCount-3] [d] shared"]
        );
    }

    #[test]
    fn test_with_spec_and_emit() {
        let (logs, sink, _) = logs_with_mocks();
        let spec = LogCallSpec::new().with_labels(["job"]).with_rate_count(2);

        for _ in 0..4 {
            logs.with_spec(spec.clone())
                .emit(Severity::Debug, "tick", &[]);
        }

        let captured = sink.get_captured();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].level, Severity::Debug);
        assert_eq!(captured[0].format, "[rateCount-2] [job] tick");
    }

    #[test]
    fn test_clones_share_state() {
        let (logs, sink, _) = logs_with_mocks();
        let clone = logs.clone();

        logs.rate_count(2).info("shared state", &[]);
        clone.rate_count(2).info("shared state", &[]);
        clone.rate_count(2).info("shared state", &[]);

        assert_eq!(sink.count(), 2);
        assert_eq!(logs.metrics().events_forwarded(), 2);
    }

    #[test]
    #[should_panic]
    fn test_failing_display_propagates() {
        struct Broken;

        impl Display for Broken {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let (logs, _, _) = logs_with_mocks();
        logs.rate_count(2).info("value {}", &[&Broken]);
    }
}
