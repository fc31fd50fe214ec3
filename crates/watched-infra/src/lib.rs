//! # Watched Infrastructure
//!
//! Concrete cache engines implementing the [`watched_core::ports::Cache`] port.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB engine with store-side TTL expiry

pub mod cache;

// Re-exports - In-Memory
pub use cache::InMemoryCache;

// Re-exports - MongoDB
#[cfg(feature = "mongodb")]
pub use cache::{MongoCache, MongoCacheOptions};
