//! Eviction list: recency ordering for cache entries
//!
//! A doubly-linked list stored in an arena of slots. Links are slot indices,
//! so the list never holds back-references that alias each other. Slots 0 and
//! 1 are the front and back sentinels; they are allocated once and never carry
//! an entry. The most recently used entry sits right after `FRONT`, the least
//! recently used one right before `BACK`.

/// Slot index of the front sentinel
const FRONT: usize = 0;

/// Slot index of the back sentinel
const BACK: usize = 1;

/// Slot in the arena
struct Node<K, V> {
    /// `None` for sentinels and for slots on the free list
    entry: Option<(K, V)>,
    prev: usize,
    next: usize,
}

impl<K, V> Node<K, V> {
    fn sentinel(prev: usize, next: usize) -> Self {
        Self {
            entry: None,
            prev,
            next,
        }
    }
}

/// Doubly-linked recency list bounded by two sentinels
pub(crate) struct EvictionList<K, V> {
    nodes: Vec<Node<K, V>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> EvictionList<K, V> {
    /// Create an empty list with room for `capacity` entries
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::sentinel(BACK, BACK));
        nodes.push(Node::sentinel(FRONT, FRONT));

        Self {
            nodes,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of real entries in the list
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Allocate a slot for a new entry and link it at the front
    pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx].entry = Some((key, value));
                idx
            }
            None => {
                self.nodes.push(Node {
                    entry: Some((key, value)),
                    prev: FRONT,
                    next: FRONT,
                });
                self.nodes.len() - 1
            }
        };

        self.insert_at_front(idx);
        self.len += 1;
        idx
    }

    /// Mark a linked entry as most recently used
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.nodes[FRONT].next == idx {
            return;
        }

        self.unlink(idx);
        self.insert_at_front(idx);
    }

    /// Slot of the least recently used entry, if any
    pub(crate) fn least_recent(&self) -> Option<usize> {
        match self.nodes[BACK].prev {
            FRONT => None,
            idx => Some(idx),
        }
    }

    /// Unlink the least recently used entry and release its slot
    pub(crate) fn pop_back(&mut self) -> Option<(usize, K, V)> {
        let idx = self.least_recent()?;
        self.unlink(idx);
        self.len -= 1;
        self.free_list.push(idx);
        self.nodes[idx].entry.take().map(|(key, value)| (idx, key, value))
    }

    /// Key and value stored at a linked slot
    pub(crate) fn get(&self, idx: usize) -> Option<(&K, &V)> {
        self.nodes
            .get(idx)
            .and_then(|node| node.entry.as_ref())
            .map(|(key, value)| (key, value))
    }

    /// Mutable value stored at a linked slot
    pub(crate) fn value_mut(&mut self, idx: usize) -> Option<&mut V> {
        self.nodes
            .get_mut(idx)
            .and_then(|node| node.entry.as_mut())
            .map(|(_, value)| value)
    }

    /// Iterate entries from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.nodes[FRONT].next,
        }
    }

    fn unlink(&mut self, idx: usize) {
        debug_assert!(idx != FRONT && idx != BACK, "sentinels are never unlinked");

        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    fn insert_at_front(&mut self, idx: usize) {
        let first = self.nodes[FRONT].next;

        self.nodes[idx].prev = FRONT;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[FRONT].next = idx;
    }
}

/// Iterator over list entries, most recently used first
pub(crate) struct Iter<'a, K, V> {
    list: &'a EvictionList<K, V>,
    cursor: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == BACK {
            return None;
        }

        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        node.entry.as_ref().map(|(key, value)| (key, value))
    }
}
