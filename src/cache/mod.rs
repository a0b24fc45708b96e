//! Cache Module
//!
//! Bounded in-memory key/value store with TTL expiration, insertion-order
//! eviction, a read-through wrapper and canonical key builders.

pub mod cache_keys;
mod entry;
mod eviction;
mod read_through;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use cache_keys::FlightSearchParams;
pub use entry::{current_timestamp_ms, CacheEntry};
pub use shared::{global, SharedCache};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum number of entries held by the process-wide store
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// TTL in seconds applied when a caller does not pass one
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Fraction of `max_size` trimmed when an overflow finds too few expired entries
pub const EVICTION_FRACTION: f64 = 0.10;
