//! LRU (Least Recently Used) engine
//!
//! Single-threaded core shared by both concurrent caches. Combines the key
//! index (O(1) lookup) with the eviction list (O(1) reorder and eviction).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::KeyIndex;
use crate::list::EvictionList;

/// What a [`LruCore::put`] did to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome<K, V> {
    /// New key stored, capacity remained
    Inserted,
    /// New key stored after evicting the least recently used entry
    Evicted(K, V),
    /// Existing key overwritten in place
    Updated,
}

impl<K, V> PutOutcome<K, V> {
    /// Whether the put introduced a key that was not resident before
    pub fn is_new_key(&self) -> bool {
        !matches!(self, PutOutcome::Updated)
    }
}

/// LRU engine with fixed capacity
///
/// Not synchronized; [`crate::LruCache`] and [`crate::BlockingLruCache`]
/// wrap it behind a lock. Invariant: every key in the index names a linked
/// slot in the list and the two always hold the same number of entries,
/// never more than `capacity`.
pub struct LruCore<K, V> {
    index: KeyIndex<K>,
    list: EvictionList<K, V>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new engine holding at most `capacity` entries
    ///
    /// # Errors
    /// [`Error::InvalidCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        debug!(capacity, "created LRU engine");

        Ok(Self {
            index: KeyIndex::with_capacity(capacity),
            list: EvictionList::with_capacity(capacity),
            capacity,
        })
    }

    /// Get a value and mark it as most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.get(key)?;
        self.list.move_to_front(idx);
        self.list.get(idx).map(|(_, value)| value)
    }

    /// Insert or overwrite a key, making it the most recently used
    ///
    /// When the key is new and the cache is full, exactly one entry (the
    /// least recently used) is evicted first.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<K, V> {
        if let Some(idx) = self.index.get(&key) {
            if let Some(slot) = self.list.value_mut(idx) {
                *slot = value;
            }
            self.list.move_to_front(idx);
            return PutOutcome::Updated;
        }

        let mut outcome = PutOutcome::Inserted;
        if self.index.len() == self.capacity {
            if let Some((idx, old_key, old_value)) = self.list.pop_back() {
                self.index.remove(&old_key);
                trace!(slot = idx, "evicted least recently used entry");
                outcome = PutOutcome::Evicted(old_key, old_value);
            }
        }

        let idx = self.list.push_front(key.clone(), value);
        self.index.insert(key, idx);

        debug_assert_eq!(self.index.len(), self.list.len());
        outcome
    }

    /// Check membership without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the engine is empty
    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Least recently used entry, the next eviction candidate
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.least_recent().and_then(|idx| self.list.get(idx))
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter()
    }
}

impl<K, V> fmt::Display for LruCore<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    /// Renders `(key,value) ` pairs, most recently used first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.list.iter() {
            write!(f, "({},{}) ", key, value)?;
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for LruCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("capacity", &self.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}
