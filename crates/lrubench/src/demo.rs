//! Walkthrough of both cache variants on a small fixed workload

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use lrucache::{BlockingLruCache, LruCache};
use tracing::info;

/// Capacity-3 walkthrough: put/get sequence, eviction and final ordering
pub fn run_plain() -> Result<String> {
    let cache = LruCache::new(3)?;
    let mut out = String::new();

    cache.put(10, 5);
    out.push_str(&format!("get(10) -> {}\n", render(cache.get(&10))));
    cache.put(2, 3);
    cache.put(3, 4);
    out.push_str(&format!("get(3)  -> {}\n", render(cache.get(&3))));
    cache.put(4, 5);
    out.push_str(&format!("get(10) -> {}\n", render(cache.get(&10))));
    out.push_str(&format!("contents (MRU -> LRU): {}\n", cache));

    info!("Plain demo done, {} evictions", cache.stats().evictions());
    Ok(out)
}

/// Same walkthrough on the blocking cache, then a reader that waits on a
/// missing key until a writer thread inserts it
pub fn run_blocking() -> Result<String> {
    let mut out = String::new();

    let cache = BlockingLruCache::new(3)?;
    cache.put(10, 5);
    out.push_str(&format!("blocking get(10) -> {}\n", cache.get(&10)));
    cache.put(2, 3);
    cache.put(3, 4);
    out.push_str(&format!("blocking get(3)  -> {}\n", cache.get(&3)));
    cache.put(4, 5);

    // 10 was evicted; a plain get would park forever
    let evicted = cache.get_timeout(&10, Duration::from_millis(100));
    out.push_str(&format!("blocking get(10) -> {}\n", render_waited(evicted)));
    out.push_str(&format!("contents (MRU -> LRU): {}\n", cache));

    let cache = Arc::new(BlockingLruCache::<i32, i32>::new(3)?);

    let reader = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || cache.get(&99))
    };

    thread::sleep(Duration::from_millis(100));
    info!("Writer inserting key 99");
    cache.put(99, 7);

    let value = reader
        .join()
        .map_err(|_| anyhow!("reader thread panicked"))?;

    out.push_str(&format!(
        "blocking get(99) -> {} (waited {} time(s))\ncontents (MRU -> LRU): {}\n",
        value,
        cache.stats().waits(),
        cache
    ));
    Ok(out)
}

fn render(value: Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "not found".to_string(),
    }
}

fn render_waited(value: Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "timed out".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_plain() {
        let out = run_plain().unwrap();

        assert!(out.starts_with("get(10) -> 5\n"));
        assert!(out.contains("get(3)  -> 4\n"));
        assert!(out.contains("get(10) -> not found\n"));
        assert!(out.contains("(4,5) (3,4) (2,3) "));
    }

    #[test]
    fn test_demo_blocking() {
        let out = run_blocking().unwrap();

        assert!(out.starts_with("blocking get(10) -> 5\n"));
        assert!(out.contains("blocking get(3)  -> 4\n"));
        assert!(out.contains("blocking get(10) -> timed out\n"));
        assert!(out.contains("(4,5) (3,4) (2,3) "));
        assert!(out.contains("blocking get(99) -> 7"));
        assert!(out.contains("(99,7) "));
    }
}
