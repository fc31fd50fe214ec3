//! In-memory cache engine - used as fallback when MongoDB is not configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use watched_core::ports::Cache;
use watched_core::{CacheEntry, CacheError, Ttl};

/// In-memory cache using a simple HashMap with async RwLock.
///
/// Follows the same liveness rules as the MongoDB engine: expired entries
/// stay in the map (and count for `exists`) until overwritten or deleted.
/// Note: Data is lost on process restart.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries, including expired ones.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.read().await.contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError> {
        let store = self.store.read().await;
        Ok(store
            .get(key)
            .filter(|entry| entry.is_live())
            .map(|entry| entry.payload.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Option<Ttl>,
    ) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), CacheEntry::new(key, value, ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}
