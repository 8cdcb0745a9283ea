//! Mock clock for testing.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock clock for testing.
///
/// Allows tests to control time progression explicitly, enabling deterministic
/// testing of time sampling.
///
/// # Examples
///
/// ```
/// use tracing_labeled_logs::infrastructure::mocks::MockClock;
/// use tracing_labeled_logs::application::ports::Clock;
/// use std::time::Duration;
///
/// let clock = MockClock::new(1_000);
/// assert_eq!(clock.now_millis(), 1_000);
///
/// clock.advance(Duration::from_secs(2));
/// assert_eq!(clock.now_millis(), 3_000);
///
/// clock.set(10_000);
/// assert_eq!(clock.now_millis(), 10_000);
/// ```
///
/// Start the clock above zero: a stored timestamp of zero means "never emitted".
///
/// # Thread Safety
///
/// All clones share the same underlying time value, so advancing time in
/// one clone affects all clones.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_millis: Arc<Mutex<u64>>,
}

impl MockClock {
    /// Create a mock clock starting at `start_millis` since the epoch.
    pub fn new(start_millis: u64) -> Self {
        Self {
            current_millis: Arc::new(Mutex::new(start_millis)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        self.advance_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
    }

    /// Advance the clock by a number of milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        let mut time = self
            .current_millis
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time = time.saturating_add(millis);
    }

    /// Set the clock to a specific time.
    pub fn set(&self, millis: u64) {
        let mut time = self
            .current_millis
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time = millis;
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> u64 {
        *self
            .current_millis
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}
