//! LruCache: thread-safe LRU cache with non-blocking reads

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use parking_lot::Mutex;

use crate::error::Result;
use crate::lru::LruCore;
use crate::stats::CacheStats;

/// Fixed-capacity LRU cache shared between threads
///
/// Every operation takes the same mutex: `get` reorders recency, so there is
/// no read-only path. A missing key is reported immediately as `None`.
///
/// Share it across threads with `Arc<LruCache<K, V>>`.
pub struct LruCache<K, V> {
    /// Engine behind the gate
    inner: Mutex<LruCore<K, V>>,

    /// Cache statistics
    stats: CacheStats,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be greater than 0
    ///
    /// # Returns
    /// * `Result<LruCache>` - `Error::InvalidCapacity` when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(LruCore::new(capacity)?),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Get a copy of a value, marking the key as most recently used
    ///
    /// # Returns
    /// * `Some(value)` on a hit, `None` if the key is not resident
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        match inner.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert or overwrite a value, marking the key as most recently used
    ///
    /// Evicts the least recently used entry when a new key arrives at full
    /// capacity.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        let outcome = inner.put(key, value);
        self.stats.record_put(&outcome);
    }

    /// Check membership without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    /// Snapshot of all entries, most recently used first
    pub fn entries(&self) -> Vec<(K, V)> {
        self.inner
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Snapshot of all keys, most recently used first
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> fmt::Display for LruCache<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.lock(), f)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("inner", &*self.inner.lock())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_cache_zero_capacity() {
        let err = LruCache::<u32, u32>::new(0).unwrap_err();
        assert_eq!(err, Error::InvalidCapacity(0));
    }

    #[test]
    fn test_cache_basic() {
        let cache = LruCache::new(10).unwrap();

        cache.put(1, "test data".to_string());

        assert_eq!(cache.get(&1).as_deref(), Some("test data"));
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 0);
        assert_eq!(cache.stats().inserts(), 1);
    }

    #[test]
    fn test_cache_miss_on_empty() {
        let cache = LruCache::<i32, i32>::new(3).unwrap();

        assert_eq!(cache.get(&-1), None);
        assert_eq!(cache.get(&99), None);
        assert_eq!(cache.stats().misses(), 2);
    }

    #[test]
    fn test_cache_not_found_is_distinct_from_values() {
        let cache = LruCache::new(3).unwrap();

        cache.put(7, -1);

        assert_eq!(cache.get(&7), Some(-1));
        assert_eq!(cache.get(&8), None);
    }

    #[test]
    fn test_cache_eviction() {
        let cache = LruCache::new(2).unwrap();

        cache.put(0, "data 0");
        cache.put(1, "data 1");
        assert_eq!(cache.len(), 2);

        cache.put(2, "data 2");

        // 0 was least recently used
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&0), None);
        assert_eq!(cache.get(&1), Some("data 1"));
        assert_eq!(cache.get(&2), Some("data 2"));
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_cache_update_refreshes() {
        let cache = LruCache::new(2).unwrap();

        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(1, 11);
        cache.put(3, 30);

        assert_eq!(cache.keys(), vec![3, 1]);
        assert_eq!(cache.get(&1), Some(11));
        assert_eq!(cache.stats().updates(), 1);
    }

    #[test]
    fn test_cache_entries_and_display() {
        let cache = LruCache::new(3).unwrap();

        cache.put(1, 100);
        cache.put(2, 200);
        cache.get(&1);

        assert_eq!(cache.entries(), vec![(1, 100), (2, 200)]);
        assert_eq!(cache.to_string(), "(1,100) (2,200) ");
    }

    #[test]
    fn test_cache_contains_does_not_touch() {
        let cache = LruCache::new(2).unwrap();

        cache.put(1, 1);
        cache.put(2, 2);
        assert!(cache.contains(&1));
        assert_eq!(cache.stats().hits(), 0);

        cache.put(3, 3);
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_cache_shared_between_threads() {
        let cache = Arc::new(LruCache::new(64).unwrap());

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..1000u64 {
                        cache.put(i % 100, t);
                        cache.get(&(i % 50));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 64);
        assert_eq!(cache.keys().len(), 64);
        assert_eq!(cache.capacity(), 64);
    }
}
