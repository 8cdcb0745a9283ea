//! Storage implementations for throttle state.
//!
//! Provides concurrent, sharded storage for per-key counters and timestamps.

use crate::application::ports::Storage;
use dashmap::DashMap;
use std::hash::Hash;

/// Thread-safe sharded storage backed by DashMap.
///
/// DashMap locks one shard per write, so updates to different keys rarely
/// contend. An entry held through [`Storage::with_entry_mut`] is exclusive for
/// the duration of the accessor.
#[derive(Debug)]
pub struct ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    map: DashMap<K, V>,
}

impl<K, V> ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new sharded storage instance.
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.map.clear();
    }
}

impl<K, V> Default for ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

// Implement the Storage port
impl<K, V> Storage<K, V> for ShardedStorage<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R,
    {
        let entry = self.map.entry(key);
        let mut value_ref = entry.or_insert_with(factory);
        accessor(&mut value_ref)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn clear(&self) {
        self.map.clear()
    }
}

// Implement Storage for Arc<ShardedStorage> to allow it to be used directly
impl<K, V> Storage<K, V> for std::sync::Arc<ShardedStorage<K, V>>
where
    K: Hash + Eq + Clone + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R,
    {
        (**self).with_entry_mut(key, factory, accessor)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&self) {
        (**self).clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_entry_mut_creates_and_updates() {
        let storage: ShardedStorage<&str, u64> = ShardedStorage::new();

        let first = storage.with_entry_mut("key", || 10, |v| *v);
        assert_eq!(first, 10);

        let updated = storage.with_entry_mut("key", || 0, |v| {
            *v += 5;
            *v
        });
        assert_eq!(updated, 15);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_clear() {
        let storage: ShardedStorage<&str, u64> = ShardedStorage::new();

        storage.with_entry_mut("key1", || 100, |_| ());
        storage.with_entry_mut("key2", || 200, |_| ());
        assert_eq!(storage.len(), 2);

        storage.clear();
        assert_eq!(storage.len(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_concurrent_read_modify_write() {
        use std::sync::Arc;
        use std::thread;

        let storage: Arc<ShardedStorage<String, u64>> = Arc::new(ShardedStorage::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let storage_clone = Arc::clone(&storage);
            let handle = thread::spawn(move || {
                for j in 0..100 {
                    storage_clone.with_entry_mut(format!("key_{}", j % 10), || 0, |v| *v += 1);
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(storage.len(), 10);
        for j in 0..10 {
            let value = storage.with_entry_mut(format!("key_{}", j), || 0, |v| *v);
            assert_eq!(value, 100);
        }
    }
}
