//! MongoDB cache engine: one document per key, expiry delegated to a TTL index.

mod connection;
mod document;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::DateTime as BsonDateTime;

use watched_core::ports::Cache;
use watched_core::{CacheError, MAX_TTL, Ttl};

pub use connection::{MongoCacheOptions, MongoConnection, database_name};
pub use document::COLLECTION_NAME;

/// MongoDB-backed cache.
///
/// Construction does no I/O; the connection is made by the first operation
/// and shared by all later ones. Errors from the driver are returned as-is,
/// with no retries.
pub struct MongoCache {
    connection: MongoConnection,
}

impl MongoCache {
    /// `url` must end with the database name, e.g. `mongodb://localhost:27017/app`.
    pub fn new(url: impl Into<String>, options: Option<MongoCacheOptions>) -> Self {
        Self {
            connection: MongoConnection::new(url, options.unwrap_or_default()),
        }
    }

    pub fn connection(&self) -> &MongoConnection {
        &self.connection
    }
}

#[async_trait]
impl Cache for MongoCache {
    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let collection = self.connection.collection().await?;
        let count = collection
            .count_documents(document::id_filter(key))
            .limit(1)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        Ok(count > 0)
    }

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError> {
        let collection = self.connection.collection().await?;
        let found = collection
            .find_one(document::id_filter(key))
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))?;

        let Some(doc) = found else {
            return Ok(None);
        };

        let entry = document::decode_entry(doc)?;
        if entry.is_live_at(Utc::now()) {
            Ok(Some(entry.payload))
        } else {
            tracing::trace!(key = %key, "Cache entry expired");
            Ok(None)
        }
    }

    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Option<Ttl>,
    ) -> Result<(), CacheError> {
        if let Some(Ttl::Finite(requested)) = ttl.filter(Ttl::exceeds_max) {
            tracing::warn!(
                key = %key,
                ttl_ms = document::saturating_millis(requested),
                max_ttl_ms = document::saturating_millis(MAX_TTL),
                "TTL exceeds the maximum; use Ttl::Infinite for long-lived entries"
            );
        }

        let payload = document::encode_payload(&value);
        let update = document::upsert_update(payload, ttl, BsonDateTime::now());

        let collection = self.connection.collection().await?;
        collection
            .update_one(document::id_filter(key), update)
            .upsert(true)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let collection = self.connection.collection().await?;
        collection
            .delete_one(document::id_filter(key))
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        Ok(())
    }
}
