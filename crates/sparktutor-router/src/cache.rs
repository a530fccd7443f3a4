// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response cache keyed by rendered prompt and tier identifier.
//!
//! [`BoundedCache`] holds at most `capacity` entries and evicts the
//! oldest-inserted key first. It sits on [`lru::LruCache`] but only ever
//! reads with `peek`, so recency is never refreshed and eviction order is
//! insertion order. The synchronous mutex is released before the caller
//! awaits anything.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use lru::LruCache;
use tracing::debug;

/// Cache key: the exact prompt sent upstream plus the model it was sent to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub prompt: String,
    pub model: String,
}

impl CacheKey {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
        }
    }
}

/// Storage for answer text shared across requests.
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<String>;

    fn insert(&self, key: CacheKey, text: String);

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// FIFO-bounded in-memory cache.
#[derive(Debug)]
pub struct BoundedCache {
    entries: Mutex<LruCache<CacheKey, String>>,
}

impl BoundedCache {
    /// A cache holding at most `capacity` entries. A capacity of zero is
    /// raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, String>> {
        // Every cache operation is a single call on `LruCache`, so a poisoned
        // lock still guards consistent data.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResponseCache for BoundedCache {
    fn get(&self, key: &CacheKey) -> Option<String> {
        self.lock().peek(key).cloned()
    }

    fn insert(&self, key: CacheKey, text: String) {
        let mut entries = self.lock();
        if let Some(existing) = entries.peek_mut(&key) {
            *existing = text;
            return;
        }
        if let Some((oldest, _)) = entries.push(key, text) {
            debug!(model = %oldest.model, "evicted oldest cache entry");
        }
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Cache that stores nothing; used when `cache.enabled = false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl ResponseCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Option<String> {
        None
    }

    fn insert(&self, _key: CacheKey, _text: String) {}

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn key(prompt: &str) -> CacheKey {
        CacheKey::new(prompt, "gpt-3.5-turbo")
    }

    #[test]
    fn get_after_insert() {
        let cache = BoundedCache::new(4);
        assert!(cache.is_empty());
        cache.insert(key("a"), "A".into());
        assert_eq!(cache.get(&key("a")).as_deref(), Some("A"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn same_prompt_different_model_is_a_different_entry() {
        let cache = BoundedCache::new(4);
        cache.insert(CacheKey::new("p", "gpt-4o"), "paid".into());
        cache.insert(CacheKey::new("p", "gpt-4-turbo"), "reason".into());
        assert_eq!(cache.get(&CacheKey::new("p", "gpt-4o")).as_deref(), Some("paid"));
        assert_eq!(
            cache.get(&CacheKey::new("p", "gpt-4-turbo")).as_deref(),
            Some("reason")
        );
        assert!(cache.get(&CacheKey::new("p", "gpt-3.5-turbo")).is_none());
    }

    #[test]
    fn evicts_oldest_inserted_first() {
        let cache = BoundedCache::new(2);
        cache.insert(key("a"), "A".into());
        cache.insert(key("b"), "B".into());
        // Reads do not refresh position.
        assert!(cache.get(&key("a")).is_some());
        cache.insert(key("c"), "C".into());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key("a")).is_none());
        assert!(cache.get(&key("b")).is_some());
        assert!(cache.get(&key("c")).is_some());
    }

    #[test]
    fn overwrite_keeps_insertion_position() {
        let cache = BoundedCache::new(2);
        cache.insert(key("a"), "A1".into());
        cache.insert(key("b"), "B".into());
        cache.insert(key("a"), "A2".into());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key("a")).as_deref(), Some("A2"));

        cache.insert(key("c"), "C".into());
        assert!(cache.get(&key("a")).is_none(), "a was inserted first");
        assert!(cache.get(&key("b")).is_some());
    }

    #[test]
    #[traced_test]
    fn full_cache_logs_eviction_and_overwrite_does_not() {
        let cache = BoundedCache::new(1);
        cache.insert(key("a"), "A1".into());
        cache.insert(key("a"), "A2".into());
        assert!(!logs_contain("evicted oldest cache entry"));

        cache.insert(key("b"), "B".into());
        assert!(logs_contain("evicted oldest cache entry"));
        assert_eq!(cache.get(&key("b")).as_deref(), Some("B"));
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let cache = BoundedCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert(key("a"), "A".into());
        cache.insert(key("b"), "B".into());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("b")).is_some());
    }

    #[test]
    fn noop_cache_never_stores() {
        let cache = NoopCache;
        cache.insert(key("a"), "A".into());
        assert!(cache.get(&key("a")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_inserts_respect_capacity() {
        let cache = Arc::new(BoundedCache::new(8));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        cache.insert(key(&format!("{t}-{i}")), "x".into());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}
