//! Cleanup / Eviction Engine
//!
//! Runs from inside `CacheStore::set` once the store exceeds its capacity.
//! Expired entries go first; if that does not free enough room, the oldest
//! fraction of the store is trimmed by insertion time.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::cache::{current_timestamp_ms, CacheEntry, EVICTION_FRACTION};

/// Outcome of one cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CleanupReport {
    /// Entries removed because their TTL had elapsed
    pub expired: usize,
    /// Live entries removed by the oldest-fraction trim
    pub evicted: usize,
}

/// Number of entries the trim phase removes for a store of `len` entries.
///
/// Normally `ceil(max_size * EVICTION_FRACTION)`, raised to the overflow so
/// tiny capacities still end within bounds.
pub(crate) fn trim_count(max_size: usize, len: usize) -> usize {
    let fraction = (max_size as f64 * EVICTION_FRACTION).ceil() as usize;
    fraction.max(len.saturating_sub(max_size))
}

/// Two-phase cleanup: expiry sweep, then oldest-fraction trim.
pub(crate) fn run_cleanup<V>(
    entries: &mut HashMap<String, CacheEntry<V>>,
    max_size: usize,
) -> CleanupReport {
    let now = current_timestamp_ms();
    let before = entries.len();

    // Phase 1: expiry sweep
    entries.retain(|_, entry| !entry.is_expired_at(now));
    let expired = before - entries.len();

    // Phase 2: oldest-fraction trim
    let mut evicted = 0;
    if entries.len() >= max_size {
        let count = trim_count(max_size, entries.len());

        let mut ranked: Vec<((i64, u64), &String)> = entries
            .iter()
            .map(|(key, entry)| (entry.age_rank(), key))
            .collect();
        ranked.sort_unstable_by_key(|(rank, _)| *rank);

        let victims: Vec<String> = ranked
            .into_iter()
            .take(count)
            .map(|(_, key)| key.clone())
            .collect();

        for key in victims {
            if entries.remove(&key).is_some() {
                evicted += 1;
            }
        }
    }

    let report = CleanupReport { expired, evicted };
    if evicted > 0 {
        info!(
            expired,
            evicted,
            remaining = entries.len(),
            "cache over capacity, trimmed oldest entries"
        );
    } else {
        debug!(expired, remaining = entries.len(), "cache expiry sweep");
    }
    report
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn fill(
        entries: &mut HashMap<String, CacheEntry<u32>>,
        prefix: &str,
        n: u64,
        ttl: i64,
        seq0: u64,
    ) {
        for i in 0..n {
            let key = format!("{}{}", prefix, i);
            entries.insert(key.clone(), CacheEntry::new(key, i as u32, ttl, seq0 + i));
        }
    }

    #[test]
    fn test_trim_count_is_ten_percent_rounded_up() {
        assert_eq!(trim_count(1000, 1001), 100);
        assert_eq!(trim_count(15, 16), 2);
        assert_eq!(trim_count(5, 6), 1);
    }

    #[test]
    fn test_trim_count_covers_overflow_for_tiny_capacity() {
        assert_eq!(trim_count(0, 1), 1);
        assert_eq!(trim_count(2, 5), 3);
    }

    #[test]
    fn test_cleanup_sweeps_expired_first() {
        let mut entries = HashMap::new();
        fill(&mut entries, "dead", 4, 0, 0);
        fill(&mut entries, "live", 7, 300, 100);

        let report = run_cleanup(&mut entries, 10);

        assert_eq!(report, CleanupReport { expired: 4, evicted: 0 });
        assert_eq!(entries.len(), 7);
        assert!(entries.keys().all(|k| k.starts_with("live")));
    }

    #[test]
    fn test_cleanup_trims_oldest_when_nothing_expired() {
        let mut entries = HashMap::new();
        fill(&mut entries, "k", 21, 300, 0);

        let report = run_cleanup(&mut entries, 20);

        assert_eq!(report, CleanupReport { expired: 0, evicted: 2 });
        assert_eq!(entries.len(), 19);
        assert!(!entries.contains_key("k0"));
        assert!(!entries.contains_key("k1"));
        assert!(entries.contains_key("k2"));
        assert!(entries.contains_key("k20"));
    }

    #[test]
    fn test_cleanup_trims_when_sweep_leaves_store_at_capacity() {
        let mut entries = HashMap::new();
        fill(&mut entries, "dead", 1, -1, 0);
        fill(&mut entries, "live", 10, 300, 10);

        let report = run_cleanup(&mut entries, 10);

        assert_eq!(report.expired, 1);
        assert_eq!(report.evicted, 1);
        assert_eq!(entries.len(), 9);
        assert!(!entries.contains_key("live0"));
    }

    #[test]
    fn test_cleanup_trim_ranks_by_insertion_not_key() {
        let mut entries = HashMap::new();
        // Lexically last key is the oldest insertion
        entries.insert("zzz".to_string(), CacheEntry::new("zzz".to_string(), 0, 300, 0));
        fill(&mut entries, "a", 3, 300, 1);

        run_cleanup(&mut entries, 3);

        assert!(!entries.contains_key("zzz"));
        assert_eq!(entries.len(), 3);
    }
}
