//! Cache Statistics Module
//!
//! Point-in-time snapshot of the store's occupancy.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of the store returned by `stats()`.
///
/// Taking a snapshot never purges anything, so `keys` may include entries
/// whose TTL has elapsed but which have not been read or evicted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the store
    pub size: usize,
    /// Capacity bound enforced on every `set`
    pub max_size: usize,
    /// Stored keys, oldest insertion first
    pub keys: Vec<String>,
}

impl CacheStats {
    // == Constructor ==
    /// Builds a snapshot from the store's capacity and its current keys.
    pub fn new(max_size: usize, keys: Vec<String>) -> Self {
        Self {
            size: keys.len(),
            max_size,
            keys,
        }
    }
}
