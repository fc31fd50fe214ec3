//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub mongo: Option<MongoSettings>,
    /// Emit JSON logs instead of pretty ones.
    pub json_logs: bool,
}

/// MongoDB engine settings.
#[derive(Debug, Clone)]
pub struct MongoSettings {
    /// Connection URL ending with the database name.
    pub url: String,
    pub app_name: Option<String>,
    pub connect_timeout: Option<Duration>,
    /// How long to wait for a usable server; defaults to the connect timeout.
    pub server_selection_timeout: Option<Duration>,
    pub max_pool_size: Option<u32>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secs = |name: &str| {
            lookup(name)
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
        };

        let mongo = lookup("WATCHED_CACHE_URL").map(|url| {
            let connect_timeout = secs("WATCHED_CACHE_CONNECT_TIMEOUT_SECS");
            MongoSettings {
                url,
                app_name: lookup("WATCHED_CACHE_APP_NAME"),
                connect_timeout,
                server_selection_timeout: secs("WATCHED_CACHE_SERVER_SELECTION_TIMEOUT_SECS")
                    .or(connect_timeout),
                max_pool_size: lookup("WATCHED_CACHE_MAX_POOL_SIZE").and_then(|s| s.parse().ok()),
            }
        });

        Self {
            mongo,
            json_logs: lookup("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}
