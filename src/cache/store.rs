//! Response Cache Store Module
//!
//! HashMap storage combined with an insertion queue for strict FIFO eviction.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionQueue};

// == Response Cache ==
/// Bounded key/value store for model responses.
///
/// Eviction always removes the entry that was inserted first. Reads do not
/// refresh an entry's position, and overwriting a key keeps its original
/// position. There is no expiry: entries live until capacity pressure or a
/// process restart removes them.
#[derive(Debug)]
pub struct ResponseCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order
    queue: InsertionQueue,
    /// Lookup and eviction counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Sequence number handed to the next new key
    next_order: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero yields a cache that never stores anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            queue: InsertionQueue::new(),
            stats: CacheStats::new(capacity),
            capacity,
            next_order: 0,
        }
    }

    // == Get ==
    /// Looks up a cached response.
    ///
    /// Takes `&mut self` only to count the hit or miss; the eviction order
    /// is never touched.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let value = self.entries.get(key).map(|entry| entry.value.clone());
        self.stats.record_lookup(value.is_some());
        value
    }

    // == Put ==
    /// Inserts or overwrites a response.
    ///
    /// Overwriting keeps the key's original position. A new key arriving
    /// while the cache is full first evicts the single oldest entry.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.replace_value(value);
            return;
        }

        if self.capacity == 0 {
            return;
        }

        while self.entries.len() >= self.capacity {
            let Some((order, evicted)) = self.queue.evict_oldest() else {
                break;
            };
            self.evict(order, &evicted);
        }

        let order = self.next_order;
        self.next_order += 1;
        self.queue.push(order, &key);
        self.entries.insert(key, CacheEntry::new(value, order));
    }

    /// Removes `key` if it is still the entry queued at `order`.
    fn evict(&mut self, order: u64, key: &str) {
        let queued = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.insertion_order == order);
        if !queued {
            debug!(key = %key, order, "skipping stale queue slot");
            return;
        }

        self.entries.remove(key);
        self.stats.record_eviction();
        debug!(key = %key, order, "evicted oldest cached response");
    }

    // == Contains ==
    /// Checks for a key without counting a lookup.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
