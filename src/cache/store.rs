//! Cache Store Module
//!
//! Bounded HashMap storage with TTL enforced on read and overflow cleanup on write.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::eviction;
use crate::cache::{CacheEntry, CacheStats, DEFAULT_MAX_SIZE, DEFAULT_TTL_SECONDS};

// == Cache Store ==
/// Bounded key/value store with per-entry TTL.
///
/// `get` is the strict read: it never returns an expired value and purges
/// the entry it finds expired. `peek` ignores TTL and never mutates, and
/// exists for the read-through wrapper's stale fallback.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Maximum number of entries kept after any `set`
    max_size: usize,
    /// Default TTL in seconds for `set` calls without explicit TTL
    default_ttl: i64,
    /// Next insertion sequence number
    next_seq: u64,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE, DEFAULT_TTL_SECONDS)
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the store keeps
    /// * `default_ttl` - Default TTL in seconds for entries without explicit TTL
    pub fn new(max_size: usize, default_ttl: i64) -> Self {
        Self {
            entries: HashMap::new(),
            max_size,
            default_ttl,
            next_seq: 0,
        }
    }

    // == Set ==
    /// Upserts a value with optional TTL (store default when `None`).
    ///
    /// Overwriting resets both timestamps. When the insert pushes the store
    /// past `max_size` the cleanup engine runs before returning.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<i64>) {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);

        let seq = self.next_seq;
        self.next_seq += 1;

        let entry = CacheEntry::new(key.clone(), value, ttl, seq);
        self.entries.insert(key, entry);

        if self.entries.len() > self.max_size {
            eviction::run_cleanup(&mut self.entries, self.max_size);
        }
    }

    // == Peek ==
    /// Returns the stored entry regardless of expiry, without touching the store.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns `true` if the key was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns a snapshot of the store. Expired entries are not purged.
    pub fn stats(&self) -> CacheStats {
        let mut ranked: Vec<&CacheEntry<V>> = self.entries.values().collect();
        ranked.sort_by_key(|entry| entry.age_rank());

        let keys = ranked.into_iter().map(|entry| entry.key.clone()).collect();
        CacheStats::new(self.max_size, keys)
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> i64 {
        self.default_ttl
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a fresh value by key.
    ///
    /// Returns `None` for absent keys and for expired ones; an expired entry
    /// is removed as part of the read.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;

        if entry.is_expired() {
            self.entries.remove(key);
            debug!(key, "purged expired entry on read");
            return None;
        }

        Some(entry.value.clone())
    }
}
