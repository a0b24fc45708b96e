//! Booking Cache - bounded in-process TTL cache for the travel booking service
//!
//! Keeps pricing, profile and reference-data lookups from hitting upstream
//! services on every request. Provides a strict TTL-enforcing façade, a
//! read-through wrapper that falls back to stale data when a fetch fails,
//! and deterministic key builders.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{cache_keys, CacheStore, SharedCache};
pub use config::Config;
