//! Sampling policies.
//!
//! Policies are pure decision rules. The state they decide on (invocation counts
//! and last-emission timestamps) lives in the
//! [`ThrottleRegistry`](crate::ThrottleRegistry); the policy only looks at a value
//! read from it.

use std::time::Duration;

/// Decision made by a sampling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Allow the call to be emitted
    Allow,
    /// Suppress the call (don't emit it)
    Suppress,
}

impl PolicyDecision {
    /// Check if this decision is Allow.
    pub fn is_allow(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }

    /// Check if this decision is Suppress.
    pub fn is_suppress(&self) -> bool {
        matches!(self, PolicyDecision::Suppress)
    }
}

/// Emit one call out of every `every` calls.
///
/// The 1st, (N+1)th, (2N+1)th, ... calls are emitted: a call passes when the
/// number of calls seen before it is a multiple of N (zero included).
///
/// # Example
/// ```
/// use tracing_labeled_logs::CountSampling;
///
/// let policy = CountSampling::new(3).unwrap();
///
/// assert!(policy.decide(0).is_allow());     // 1st call
/// assert!(policy.decide(1).is_suppress());
/// assert!(policy.decide(2).is_suppress());
/// assert!(policy.decide(3).is_allow());     // 4th call
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSampling {
    every: u32,
}

impl CountSampling {
    /// Create a count policy, or `None` when `every` is zero (sampling disabled).
    pub fn new(every: u32) -> Option<Self> {
        if every == 0 {
            None
        } else {
            Some(Self { every })
        }
    }

    /// The configured N.
    pub fn every(&self) -> u32 {
        self.every
    }

    /// Decide based on the counter value observed *before* this call incremented it.
    pub fn decide(&self, previous_count: u64) -> PolicyDecision {
        if previous_count % u64::from(self.every) == 0 {
            PolicyDecision::Allow
        } else {
            PolicyDecision::Suppress
        }
    }
}

/// Emit at most once per minimum interval.
///
/// # Example
/// ```
/// use tracing_labeled_logs::TimeSampling;
/// use std::time::Duration;
///
/// let policy = TimeSampling::new(Duration::from_millis(1000)).unwrap();
///
/// assert!(policy.decide(None, 10_000).is_allow());          // never emitted
/// assert!(policy.decide(Some(10_000), 10_500).is_suppress());
/// assert!(policy.decide(Some(10_000), 11_200).is_allow());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSampling {
    min_interval_ms: u64,
}

impl TimeSampling {
    /// Create a time policy, or `None` when the interval is zero (sampling disabled).
    ///
    /// Intervals are compared in whole milliseconds; anything under 1ms disables
    /// the policy.
    pub fn new(min_interval: Duration) -> Option<Self> {
        let min_interval_ms = u64::try_from(min_interval.as_millis()).unwrap_or(u64::MAX);
        if min_interval_ms == 0 {
            None
        } else {
            Some(Self { min_interval_ms })
        }
    }

    /// The configured interval in milliseconds.
    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    /// Decide based on the last permitted emission time.
    ///
    /// # Arguments
    /// * `last_emit_ms` - Milliseconds since epoch of the last permitted emission,
    ///   or `None` if this key never emitted
    /// * `now_ms` - Current milliseconds since epoch
    ///
    /// A clock that moved backwards counts as zero elapsed time.
    pub fn decide(&self, last_emit_ms: Option<u64>, now_ms: u64) -> PolicyDecision {
        match last_emit_ms {
            Some(last) if now_ms.saturating_sub(last) < self.min_interval_ms => {
                PolicyDecision::Suppress
            }
            _ => PolicyDecision::Allow,
        }
    }
}
