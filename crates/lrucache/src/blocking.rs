//! BlockingLruCache: thread-safe LRU cache whose reads wait for the key
//!
//! Readers of a missing key release the lock and park on a condition
//! variable. Every put of a new key wakes all parked readers; each re-checks
//! its own key under the lock and parks again if it is still absent. Readers
//! only register on the condition variable while holding the lock, so an
//! insert can never slip in between the check and the wait.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};
use parking_lot::{Condvar, Mutex};
use tracing::trace;

use crate::error::Result;
use crate::lru::LruCore;
use crate::stats::CacheStats;

/// Fixed-capacity LRU cache with blocking reads
///
/// Writes behave exactly like [`crate::LruCache::put`]. [`get`](Self::get)
/// never reports a miss: it returns once the key is resident.
///
/// # Liveness
/// `get` has no timeout. If the key is never inserted the calling thread
/// stays parked forever, and a key evicted before the waiter re-acquires
/// the lock sends it back to waiting. Use [`get_timeout`](Self::get_timeout)
/// when the caller must be able to give up.
pub struct BlockingLruCache<K, V> {
    /// Engine behind the gate
    inner: Mutex<LruCore<K, V>>,

    /// Signalled on every insertion of a new key
    key_inserted: Condvar,

    /// Cache statistics
    stats: CacheStats,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> BlockingLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new blocking cache with the given capacity
    ///
    /// # Returns
    /// * `Result<BlockingLruCache>` - `Error::InvalidCapacity` when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(LruCore::new(capacity)?),
            key_inserted: Condvar::new(),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Get a copy of a value, waiting until the key is present
    ///
    /// Marks the key as most recently used. Blocks indefinitely if the key
    /// never appears.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let mut waited = false;

        loop {
            if let Some(value) = inner.get(key) {
                self.stats.record_hit();
                return value.clone();
            }

            if !waited {
                self.stats.record_miss();
                waited = true;
            }
            self.stats.record_wait();
            trace!("reader parked until a new key is inserted");
            self.key_inserted.wait(&mut inner);
            trace!("reader woken, rechecking key");
        }
    }

    /// Get a copy of a value, waiting at most `timeout` for the key
    ///
    /// # Returns
    /// * `Some(value)` once the key is present, `None` if the deadline passed first
    pub fn get_timeout<Q>(&self, key: &Q, timeout: Duration) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return Some(self.get(key)),
        };

        let mut inner = self.inner.lock();
        let mut waited = false;
        let mut timed_out = false;

        loop {
            if let Some(value) = inner.get(key) {
                self.stats.record_hit();
                return Some(value.clone());
            }

            if !waited {
                self.stats.record_miss();
                waited = true;
            }
            if timed_out {
                trace!("reader gave up waiting");
                return None;
            }

            self.stats.record_wait();
            trace!("reader parked until a new key is inserted or the deadline passes");
            timed_out = self.key_inserted.wait_until(&mut inner, deadline).timed_out();
            trace!(timed_out, "reader woken, rechecking key");
        }
    }

    /// Insert or overwrite a value, marking the key as most recently used
    ///
    /// Wakes every parked reader when the key was not resident before.
    /// Overwriting an existing key wakes nobody.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        let outcome = inner.put(key, value);
        self.stats.record_put(&outcome);

        if outcome.is_new_key() {
            self.key_inserted.notify_all();
        }
    }

    /// Check membership without touching recency or waiting
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

impl<K, V> fmt::Display for BlockingLruCache<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.lock(), f)
    }
}

impl<K, V> fmt::Debug for BlockingLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingLruCache")
            .field("inner", &*self.inner.lock())
            .field("stats", &self.stats)
            .finish()
    }
}
