//! Integration Tests for the cache façade and read-through wrapper

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use booking_cache::cache::{cache_keys, CacheStore, FlightSearchParams, SharedCache};
use serde_json::{json, Value};

fn cache() -> SharedCache<Value> {
    SharedCache::new(CacheStore::default())
}

#[tokio::test]
async fn test_short_ttl_expires_and_is_purged() {
    let cache = cache();

    cache.set("k", json!("v"), Some(1)).await;
    assert_eq!(cache.get("k").await, Some(json!("v")));

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(cache.get("k").await, None);
    assert_eq!(cache.stats().await.size, 0);
}

#[tokio::test]
async fn test_overflow_settles_within_bounds() {
    let cache = cache();

    for i in 0..1000 {
        cache.set(format!("key{}", i), json!(i), Some(300)).await;
    }
    assert_eq!(cache.stats().await.size, 1000);

    cache.set("key1000", json!(1000), Some(300)).await;

    let stats = cache.stats().await;
    assert!((890..=901).contains(&stats.size), "size was {}", stats.size);
    assert_eq!(stats.max_size, 1000);
    assert!(!stats.keys.contains(&"key0".to_string()));
    assert!(stats.keys.contains(&"key1000".to_string()));
}

#[tokio::test]
async fn test_with_cache_fetches_once_then_refetches_after_expiry() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = cache_keys::exchange_rate();

    let fetch = |calls: Arc<AtomicUsize>| async move {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, anyhow::Error>(json!({"USD_TRY": 34.0 + n as f64}))
    };

    let first = cache
        .with_cache_ttl(&key, Some(1), || fetch(calls.clone()))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let second = cache
        .with_cache_ttl(&key, Some(1), || fetch(calls.clone()))
        .await
        .unwrap();
    assert_eq!(second, first);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let third = cache
        .with_cache_ttl(&key, Some(1), || fetch(calls.clone()))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(third, json!({"USD_TRY": 35.0}));
}

#[tokio::test]
async fn test_with_cache_serves_stale_after_expiry_when_fetch_fails() {
    let cache = cache();
    let key = cache_keys::user_profile(42);

    cache
        .with_cache_ttl(&key, Some(1), || async {
            Ok::<_, anyhow::Error>(json!({"name": "Ada"}))
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let calls = AtomicUsize::new(0);
    let value = cache
        .with_cache(&key, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<Value, _>(anyhow!("profile service unavailable"))
        })
        .await
        .unwrap();

    assert_eq!(value, json!({"name": "Ada"}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_with_cache_propagates_failure_for_unseen_key() {
    #[derive(Debug, PartialEq)]
    struct UpstreamDown(u16);

    impl std::fmt::Display for UpstreamDown {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "upstream returned {}", self.0)
        }
    }

    let cache = cache();
    let key = cache_keys::airport_data("IST");

    let result = cache
        .with_cache(&key, || async { Err::<Value, _>(UpstreamDown(503)) })
        .await;

    assert_eq!(result, Err(UpstreamDown(503)));
    assert!(cache.stats().await.keys.is_empty());
}

#[tokio::test]
async fn test_concurrent_misses_each_fetch() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    let run = |cache: SharedCache<Value>, calls: Arc<AtomicUsize>| async move {
        let key = cache_keys::campaigns();
        cache
            .with_cache(&key, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, anyhow::Error>(json!(["winter-sale"]))
            })
            .await
    };

    let (a, b) = tokio::join!(
        run(cache.clone(), calls.clone()),
        run(cache.clone(), calls.clone())
    );

    assert_eq!(a.unwrap(), json!(["winter-sale"]));
    assert_eq!(b.unwrap(), json!(["winter-sale"]));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.stats().await.size, 1);
}

#[tokio::test]
async fn test_flight_search_keys_share_entry() {
    let cache = cache();
    let params = FlightSearchParams {
        origin: "IST".to_string(),
        destination: "AYT".to_string(),
        departure_date: "2026-12-20".to_string(),
        return_date: None,
        adults: 1,
        children: 0,
        infants: 0,
        cabin_class: None,
    };
    let from_json = cache_keys::flight_search(&json!({
        "adults": 1,
        "infants": 0,
        "children": 0,
        "departure_date": "2026-12-20",
        "destination": "AYT",
        "origin": "IST",
    }));

    cache.set(params.cache_key(), json!({"offers": 3}), None).await;

    assert_eq!(cache.get(&from_json).await, Some(json!({"offers": 3})));
}
