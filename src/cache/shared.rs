//! Shared Cache Handle
//!
//! Process-wide access to a single `CacheStore` from async request handlers.

use std::sync::{Arc, OnceLock};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;

// == Shared Cache ==
/// Cheaply clonable handle to one store.
///
/// Every operation takes the lock, runs the synchronous store method to
/// completion and releases it; no lock is ever held across an await.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for SharedCache<V> {
    fn default() -> Self {
        Self::new(CacheStore::default())
    }
}

impl<V> SharedCache<V> {
    /// Wraps an owned store.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a store sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::new(config.max_entries, config.default_ttl))
    }

    /// Upserts a value; `None` TTL uses the store default.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<i64>) {
        self.inner.write().await.set(key, value, ttl);
    }

    /// Removes a key, returning whether it was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Empties the store.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Snapshot of size, capacity and keys.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub(crate) fn store(&self) -> &RwLock<CacheStore<V>> {
        &self.inner
    }
}

impl<V: Clone> SharedCache<V> {
    /// Strict read; purges the entry when it has expired.
    ///
    /// Takes the write lock because an expired hit mutates the store.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }
}

// == Process-wide Instance ==
static GLOBAL: OnceLock<SharedCache<Value>> = OnceLock::new();

/// Returns the process-wide cache, created from the environment on first use.
pub fn global() -> &'static SharedCache<Value> {
    GLOBAL.get_or_init(|| {
        let config = Config::from_env();
        info!(
            max_entries = config.max_entries,
            default_ttl = config.default_ttl,
            "initializing process-wide cache"
        );
        SharedCache::from_config(&config)
    })
}
