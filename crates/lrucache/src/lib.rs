//! # lrucache
//!
//! Fixed-capacity, thread-safe LRU cache.
//!
//! ## Architecture
//! - **Key index**: AHash map from key to arena slot (O(1) lookup)
//! - **Eviction list**: arena-backed doubly-linked list with front/back
//!   sentinels (O(1) reorder and eviction)
//! - **Gate**: one `parking_lot::Mutex` serializes every get and put
//!
//! ## Variants
//! - [`LruCache`]: `get` returns `None` immediately on a miss
//! - [`BlockingLruCache`]: `get` parks the caller until the key is inserted
//!
//! ```
//! use lrucache::LruCache;
//!
//! let cache = LruCache::new(2).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.to_string(), "(3,three) (1,one) ");
//! ```

#![warn(missing_docs)]

mod blocking;
mod cache;
mod error;
mod index;
mod list;
mod lru;
mod stats;

pub use blocking::BlockingLruCache;
pub use cache::LruCache;
pub use error::{Error, Result};
pub use lru::{LruCore, PutOutcome};
pub use stats::CacheStats;
