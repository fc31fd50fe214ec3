//! Engine selection - MongoDB when configured, in-memory otherwise.

use std::sync::Arc;

use watched_core::ports::Cache;
use watched_infra::InMemoryCache;

#[cfg(feature = "mongodb")]
use watched_infra::{MongoCache, MongoCacheOptions};

use crate::config::AppConfig;
#[cfg(feature = "mongodb")]
use crate::config::MongoSettings;

/// Build the cache engine described by the configuration.
pub fn build_cache(config: &AppConfig) -> Arc<dyn Cache> {
    if let Some(cache) = mongo_cache(config) {
        return cache;
    }

    tracing::warn!("Using in-memory cache engine; entries do not outlive this process");
    Arc::new(InMemoryCache::new())
}

#[cfg(feature = "mongodb")]
fn mongo_cache(config: &AppConfig) -> Option<Arc<dyn Cache>> {
    let mongo = config.mongo.as_ref()?;

    tracing::debug!("Using MongoDB cache engine");
    Some(Arc::new(MongoCache::new(
        mongo.url.clone(),
        Some(mongo_options(mongo)),
    )))
}

#[cfg(feature = "mongodb")]
fn mongo_options(mongo: &MongoSettings) -> MongoCacheOptions {
    MongoCacheOptions {
        app_name: mongo.app_name.clone(),
        connect_timeout: mongo.connect_timeout,
        server_selection_timeout: mongo.server_selection_timeout,
        max_pool_size: mongo.max_pool_size,
    }
}

#[cfg(not(feature = "mongodb"))]
fn mongo_cache(config: &AppConfig) -> Option<Arc<dyn Cache>> {
    if config.mongo.is_some() {
        tracing::warn!("WATCHED_CACHE_URL is set but the mongodb feature is disabled");
    }
    None
}
