//! Domain types - cache entries and their TTL policy.

mod entry;

pub use entry::{CacheEntry, MAX_TTL, Ttl};
