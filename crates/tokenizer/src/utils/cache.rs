//! Merge cache for repeated pre-tokens.
//!
//! Maps a byte-mapped pre-token to its merged, space-separated symbols.
//! Entries are never evicted and live as long as the tokenizer. The map is
//! behind a mutex so one tokenizer can be shared across threads; the merge
//! itself runs outside the lock, so two threads may compute the same entry
//! at once; both produce the same value and the first insert wins.

use ahash::AHashMap;
use cliptok_core::{END_OF_TEXT, START_OF_TEXT};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Unbounded, thread-safe merge cache.
#[derive(Debug)]
pub struct MergeCache {
    entries: Mutex<AHashMap<String, String>>,
}

impl MergeCache {
    /// Create a cache with room for `capacity` entries, seeded with the
    /// special tokens mapping to themselves.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut entries = AHashMap::with_capacity(capacity.max(2));
        entries.insert(START_OF_TEXT.to_string(), START_OF_TEXT.to_string());
        entries.insert(END_OF_TEXT.to_string(), END_OF_TEXT.to_string());
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Create a cache with default capacity (1024).
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    // Entries are only ever inserted whole, so a poisoned map is still
    // consistent.
    fn lock(&self) -> MutexGuard<'_, AHashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the cached merge for `token`, computing and storing it on a miss.
    ///
    /// # Arguments
    /// * `token` - The pre-token, already mapped to byte symbols
    /// * `merge` - Computes the merged form on a cache miss
    ///
    /// # Returns
    /// The space-separated merged symbols. When two threads miss on the same
    /// token, both get the entry stored first.
    pub fn get_or_merge<F>(&self, token: &str, merge: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        if let Some(hit) = self.get(token) {
            return hit;
        }

        log::trace!("merge cache miss for {:?}", token);
        let merged = merge(token);

        self.lock()
            .entry(token.to_string())
            .or_insert(merged)
            .clone()
    }

    /// Get the cached merge for `token`.
    pub fn get(&self, token: &str) -> Option<String> {
        self.lock().get(token).cloned()
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for MergeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_seeded_with_special_tokens() {
        let cache = MergeCache::new();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(START_OF_TEXT).as_deref(), Some(START_OF_TEXT));
        assert_eq!(cache.get(END_OF_TEXT).as_deref(), Some(END_OF_TEXT));
    }

    #[test]
    fn test_cache_hit_miss() {
        let cache = MergeCache::with_capacity(4);

        let first = cache.get_or_merge("hello", |_| "hel lo</w>".to_string());
        assert_eq!(first, "hel lo</w>");

        let second = cache.get_or_merge("hello", |_| panic!("Should not merge"));
        assert_eq!(second, "hel lo</w>");

        let other = cache.get_or_merge("world", |_| "world</w>".to_string());
        assert_eq!(other, "world</w>");
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_hit_leaves_other_entries_alone() {
        let cache = MergeCache::new();
        cache.get_or_merge("a", |_| "a</w>".to_string());
        cache.get_or_merge("b", |_| "b</w>".to_string());

        cache.get_or_merge("a", |_| unreachable!());
        assert_eq!(cache.get("b").as_deref(), Some("b</w>"));
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_never_evicts() {
        let cache = MergeCache::with_capacity(1);
        for i in 0..100 {
            let key = format!("t{}", i);
            cache.get_or_merge(&key, |k| format!("{}</w>", k));
        }
        assert_eq!(cache.len(), 102);
        assert_eq!(cache.get("t0").as_deref(), Some("t0</w>"));
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(MergeCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let key = format!("w{}", i);
                        let value = cache.get_or_merge(&key, |k| format!("{}</w>", k));
                        assert_eq!(value, format!("w{}</w>", i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 52);
    }
}
