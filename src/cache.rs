// Bounded in-memory LRU cache with one in-flight computation per key.
// Entries never expire by time; they leave only by eviction or clear().

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use std::future::Future;
use std::hash::Hash;

use crate::metrics::{CACHE_HITS, CACHE_MISSES, CACHE_SIZE};

pub const DEFAULT_CAPACITY: usize = 128;

pub struct LruCache<K, V> {
    capacity: usize,
    entries: Cache<K, V>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Cache::builder()
                .max_capacity(capacity as u64)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the stored value for `key`, or runs `compute` once and stores its result.
    ///
    /// Concurrent callers for the same key wait on the same computation instead of
    /// starting their own. If the computing caller is dropped, a waiter takes over.
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let entry = self.entries.entry(key.clone()).or_insert_with(compute()).await;

        // fresh only for the caller whose future produced the value
        if entry.is_fresh() {
            CACHE_MISSES.inc();
            CACHE_SIZE.set(self.entries.entry_count() as f64);
            tracing::debug!(?key, "cache miss");
        } else {
            CACHE_HITS.inc();
            tracing::debug!(?key, "cache hit");
        }

        entry.into_value()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // Settles pending evictions first so the count is exact
    pub async fn len(&self) -> usize {
        self.entries.run_pending_tasks().await;
        let len = self.entries.entry_count() as usize;
        CACHE_SIZE.set(len as f64);
        len
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        CACHE_SIZE.set(0.0);
    }
}
