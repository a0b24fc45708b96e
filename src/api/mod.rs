//! API Module
//!
//! Operator-facing HTTP surface over the process-wide cache.
//!
//! # Endpoints
//! - `PUT /cache/set` - Store a key-value pair
//! - `GET /cache/get/:key` - Retrieve a fresh value by key
//! - `DELETE /cache/del/:key` - Delete a key
//! - `POST /cache/clear` - Remove every entry
//! - `GET /cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
