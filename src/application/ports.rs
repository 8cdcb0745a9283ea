//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::domain::severity::Severity;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Port for obtaining current wall-clock time.
///
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Port for concurrent key-value storage.
///
/// This abstraction allows the application layer to store and retrieve values
/// without depending on specific concurrent data structure implementations.
/// Infrastructure provides concrete implementations (ShardedStorage).
pub trait Storage<K, V>: Send + Sync + Debug
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Access an entry with mutable access, creating it if necessary.
    ///
    /// The accessor runs while the entry is exclusively held, so a
    /// read-modify-write inside it is atomic with respect to other callers
    /// using the same key.
    ///
    /// # Arguments
    /// * `key` - The key to look up
    /// * `factory` - Function to create a new value if the key doesn't exist
    /// * `accessor` - Function that gets mutable access to the value
    ///
    /// # Returns
    /// The result from the accessor function
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R;

    /// Get the number of entries in the storage.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Clear all entries from the storage.
    fn clear(&self);
}

/// Port for the leveled logger backend.
///
/// Each method receives the composed format string (with `{}` placeholders) and
/// the original positional arguments. Implementations own rendering: a mismatch
/// between placeholders and arguments is theirs to handle and must not panic.
pub trait Sink: Send + Sync + Debug {
    fn trace(&self, format: &str, arguments: &[&dyn Display]);
    fn debug(&self, format: &str, arguments: &[&dyn Display]);
    fn info(&self, format: &str, arguments: &[&dyn Display]);
    fn warn(&self, format: &str, arguments: &[&dyn Display]);
    fn error(&self, format: &str, arguments: &[&dyn Display]);

    /// Route a message to the backend call matching `level`.
    fn emit(&self, level: Severity, format: &str, arguments: &[&dyn Display]) {
        match level {
            Severity::Trace => self.trace(format, arguments),
            Severity::Debug => self.debug(format, arguments),
            Severity::Info => self.info(format, arguments),
            Severity::Warn => self.warn(format, arguments),
            Severity::Error => self.error(format, arguments),
        }
    }
}
