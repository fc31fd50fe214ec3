//! Ports - trait definitions that cache engines implement.

mod cache;

pub use cache::{Cache, CacheExt};
