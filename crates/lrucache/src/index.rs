//! Key index: key to eviction-list slot lookup

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Maps each resident key to the slot holding its entry
///
/// Ordering lives entirely in the eviction list; the index only answers
/// "where is this key".
pub(crate) struct KeyIndex<K> {
    map: HashMap<K, usize, RandomState>,
}

impl<K: Hash + Eq> KeyIndex<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn insert(&mut self, key: K, idx: usize) {
        self.map.insert(key, idx);
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_basic() {
        let mut index = KeyIndex::with_capacity(4);

        index.insert("a".to_string(), 2);
        index.insert("b".to_string(), 3);

        assert_eq!(index.get("a"), Some(2));
        assert!(index.contains("b"));
        assert_eq!(index.len(), 2);

        assert_eq!(index.remove("a"), Some(2));
        assert_eq!(index.get("a"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_index_overwrite() {
        let mut index = KeyIndex::with_capacity(4);

        index.insert(7u64, 2);
        index.insert(7u64, 5);

        assert_eq!(index.get(&7), Some(5));
        assert_eq!(index.len(), 1);
    }
}
