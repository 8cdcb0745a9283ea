//! Sampling decisions.
//!
//! The sampler runs the count throttle and then the time throttle against the
//! shared [`ThrottleRegistry`]. Either one may suppress a call.

use crate::application::metrics::Metrics;
use crate::application::ports::Storage;
use crate::application::registry::ThrottleRegistry;
use crate::domain::{
    call::LogCallSpec,
    policy::{CountSampling, PolicyDecision, TimeSampling},
    rate_key::RateKey,
};
use std::time::Duration;

/// Outcome of sampling one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDecision {
    /// Let the call through
    Allow,
    /// Dropped by the count throttle
    SuppressedByCount,
    /// Dropped by the time throttle
    SuppressedByTime,
}

impl SampleDecision {
    /// Check if the call may be emitted.
    pub fn is_allow(&self) -> bool {
        matches!(self, SampleDecision::Allow)
    }
}

/// Coordinates sampling decisions.
#[derive(Clone)]
pub struct Sampler<S>
where
    S: Storage<RateKey, u64> + Clone,
{
    registry: ThrottleRegistry<S>,
    metrics: Metrics,
}

impl<S> Sampler<S>
where
    S: Storage<RateKey, u64> + Clone,
{
    /// Create a new sampler.
    pub fn new(registry: ThrottleRegistry<S>, metrics: Metrics) -> Self {
        Self { registry, metrics }
    }

    /// Count throttle.
    ///
    /// Returns `true` when the call must be suppressed. A zero threshold never
    /// suppresses and leaves no state behind.
    pub fn should_suppress_by_count(&self, key: RateKey, threshold: u32) -> bool {
        match CountSampling::new(threshold) {
            Some(policy) => self.count_decision(key, policy).is_suppress(),
            None => false,
        }
    }

    /// Time throttle.
    ///
    /// Returns `true` when the call must be suppressed. An unset or zero interval
    /// never suppresses and leaves no state behind. The stored timestamp is only
    /// updated when the call is allowed.
    pub fn should_suppress_by_time(&self, key: RateKey, min_interval: Option<Duration>) -> bool {
        match min_interval.and_then(TimeSampling::new) {
            Some(policy) => self.time_decision(key, policy).is_suppress(),
            None => false,
        }
    }

    /// Run both throttles for a configured call, count first.
    ///
    /// The count throttle always advances its counter, even when the time
    /// throttle ends up suppressing the call.
    pub fn check(&self, key: RateKey, spec: &LogCallSpec) -> SampleDecision {
        let decision = if self.should_suppress_by_count(key, spec.rate_count()) {
            SampleDecision::SuppressedByCount
        } else if self.should_suppress_by_time(key, spec.rate_time()) {
            SampleDecision::SuppressedByTime
        } else {
            SampleDecision::Allow
        };

        match decision {
            SampleDecision::Allow => {}
            SampleDecision::SuppressedByCount => self.metrics.record_suppressed_by_count(),
            SampleDecision::SuppressedByTime => self.metrics.record_suppressed_by_time(),
        }

        decision
    }

    fn count_decision(&self, key: RateKey, policy: CountSampling) -> PolicyDecision {
        let previous = self.registry.fetch_increment(key);
        policy.decide(previous)
    }

    fn time_decision(&self, key: RateKey, policy: TimeSampling) -> PolicyDecision {
        self.registry.with_last_emit(key, |last, now| {
            let decision = policy.decide(last, now);
            match decision {
                PolicyDecision::Allow => (Some(now), decision),
                PolicyDecision::Suppress => (None, decision),
            }
        })
    }

    /// Get a reference to the registry.
    pub fn registry(&self) -> &ThrottleRegistry<S> {
        &self.registry
    }

    /// Get a reference to the metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
