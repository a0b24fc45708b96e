//! Read-Through Wrapper
//!
//! Serves a fresh cached value, otherwise fetches and stores, otherwise
//! falls back to whatever value was last stored for the key.

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, warn};

use crate::cache::{current_timestamp_ms, SharedCache};

impl<V: Clone> SharedCache<V> {
    /// Read-through lookup using the store's default TTL.
    ///
    /// See [`SharedCache::with_cache_ttl`].
    pub async fn with_cache<F, Fut, E>(&self, key: &str, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display,
    {
        self.with_cache_ttl(key, None, fetcher).await
    }

    /// Read-through lookup with an explicit TTL.
    ///
    /// 1. A fresh entry is returned without calling `fetcher`.
    /// 2. Otherwise `fetcher` runs; on success the result is stored and returned.
    /// 3. If `fetcher` fails and any value, fresh or stale, was stored for
    ///    `key`, that value is returned. With nothing stored, the fetcher's
    ///    error is returned unchanged.
    ///
    /// Concurrent misses on the same key each run their own fetcher. There
    /// is no timeout here; wrap the fetcher if one is needed.
    pub async fn with_cache_ttl<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<i64>,
        fetcher: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display,
    {
        let previous = {
            let store = self.store().read().await;
            store
                .peek(key)
                .map(|entry| (entry.value.clone(), entry.expires_at))
        };

        if let Some((value, expires_at)) = &previous {
            if current_timestamp_ms() < *expires_at {
                debug!(key, "read-through hit");
                return Ok(value.clone());
            }
        }

        match fetcher().await {
            Ok(value) => {
                self.store().write().await.set(key, value.clone(), ttl);
                debug!(key, "read-through populated");
                Ok(value)
            }
            Err(err) => match previous {
                Some((stale, _)) => {
                    warn!(key, error = %err, "fetch failed, serving stale value");
                    Ok(stale)
                }
                None => Err(err),
            },
        }
    }
}
