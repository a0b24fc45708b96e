//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::sync::OnceLock;
use std::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and timestamps.
///
/// The value is opaque to the cache and is never inspected.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Key the entry is stored under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Insertion timestamp (monotonic milliseconds)
    pub inserted_at: i64,
    /// Expiration timestamp (monotonic milliseconds)
    pub expires_at: i64,
    /// Store-wide insertion counter, breaks `inserted_at` ties
    pub(crate) seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `key` - Key the entry is stored under
    /// * `value` - The value to store
    /// * `ttl_seconds` - TTL in seconds; zero or negative yields an already expired entry
    /// * `seq` - Insertion sequence number assigned by the store
    pub fn new(key: String, value: V, ttl_seconds: i64, seq: u64) -> Self {
        let now = current_timestamp_ms();
        let expires_at = now.saturating_add(ttl_seconds.saturating_mul(1000));

        Self {
            key,
            value,
            inserted_at: now,
            expires_at,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches `expires_at`, so an
    /// entry inserted with a TTL of zero is expired immediately.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks expiry against a caller-supplied timestamp.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Ordering key for eviction: oldest insertion first.
    pub(crate) fn age_rank(&self) -> (i64, u64) {
        (self.inserted_at, self.seq)
    }
}

// == Utility Functions ==
static CLOCK_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Returns monotonic milliseconds elapsed since the process clock anchor.
///
/// Backed by `Instant`, so wall-clock adjustments never move it backwards.
pub fn current_timestamp_ms() -> i64 {
    let anchor = CLOCK_ANCHOR.get_or_init(Instant::now);
    anchor.elapsed().as_millis() as i64
}
