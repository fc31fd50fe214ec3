use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::Ttl;
use crate::error::CacheError;

/// Cache trait - abstraction over caching engines (MongoDB, in-memory).
///
/// Every engine follows the same liveness rules: `get` hides entries whose
/// TTL has elapsed, while `exists` reports any stored entry.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Check if an entry is stored for `key`, live or not.
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// Get the payload for `key` if the entry is live.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError>;

    /// Insert or replace the entry for `key`.
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Option<Ttl>,
    ) -> Result<(), CacheError>;

    /// Delete the entry for `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Typed access on top of the JSON payload model.
#[async_trait]
pub trait CacheExt: Cache {
    async fn get_as<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn set_as<T>(&self, key: &str, value: &T, ttl: Option<Ttl>) -> Result<(), CacheError>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(value)?;
        self.set(key, value, ttl).await
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}
