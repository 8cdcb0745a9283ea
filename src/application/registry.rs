//! Shared throttling state.
//!
//! The registry owns the two per-key maps the sampler works on:
//! - invocation counts, for count sampling
//! - last permitted emission time (ms since epoch), for time sampling
//!
//! Entries are created on first use and are never evicted. Memory therefore
//! grows with the number of distinct rate keys seen over the process lifetime;
//! statements whose arguments are high-cardinality (ids, timestamps) each get
//! their own entry. Use [`ThrottleRegistry::clear`] or a fresh registry to reset.

use crate::application::ports::{Clock, Storage};
use crate::domain::rate_key::RateKey;
use std::sync::Arc;

/// Registry managing all throttle state.
///
/// This type is generic over the storage implementation. In production, use
/// `Arc<ShardedStorage<RateKey, u64>>`. Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct ThrottleRegistry<S>
where
    S: Storage<RateKey, u64> + Clone,
{
    counts: S,
    last_emits: S,
    clock: Arc<dyn Clock>,
}

impl<S> ThrottleRegistry<S>
where
    S: Storage<RateKey, u64> + Clone,
{
    /// Create a registry from two independent maps and a clock.
    pub fn new(counts: S, last_emits: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            counts,
            last_emits,
            clock,
        }
    }

    /// Atomically increment the counter for `key`, returning the value before
    /// the increment (0 on first sight).
    pub fn fetch_increment(&self, key: RateKey) -> u64 {
        self.counts.with_entry_mut(
            key,
            || 0,
            |count| {
                let previous = *count;
                *count = count.wrapping_add(1);
                previous
            },
        )
    }

    /// Access the last emission time for `key` with a callback.
    ///
    /// The callback receives the stored timestamp (`None` if the key never
    /// emitted) and the current time, and returns the new timestamp to store, if
    /// any, along with a result. The whole read-decide-write runs while the
    /// entry is held.
    pub fn with_last_emit<F, R>(&self, key: RateKey, f: F) -> R
    where
        F: FnOnce(Option<u64>, u64) -> (Option<u64>, R),
    {
        let now = self.clock.now_millis();
        self.last_emits.with_entry_mut(
            key,
            || 0,
            |last| {
                let previous = if *last == 0 { None } else { Some(*last) };
                let (update, result) = f(previous, now);
                if let Some(timestamp) = update {
                    *last = timestamp;
                }
                result
            },
        )
    }

    /// Number of keys with a count entry.
    pub fn count_keys(&self) -> usize {
        self.counts.len()
    }

    /// Number of keys with a time entry.
    pub fn time_keys(&self) -> usize {
        self.last_emits.len()
    }

    /// Check if no state is tracked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.last_emits.is_empty()
    }

    /// Clear all tracked state.
    pub fn clear(&self) {
        self.counts.clear();
        self.last_emits.clear();
    }

    /// The clock used for time sampling.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
