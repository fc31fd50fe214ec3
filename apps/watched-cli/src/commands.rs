//! Subcommands - each maps onto one cache operation.

use anyhow::Context;
use clap::{Args, Subcommand};

use watched_core::Ttl;
use watched_core::ports::Cache;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print whether an entry is stored for KEY (expired entries count).
    Exists { key: String },
    /// Print the live payload for KEY as JSON, or `null`.
    Get { key: String },
    /// Store a JSON payload under KEY.
    Set {
        key: String,
        /// Payload as JSON text.
        value: String,
        #[command(flatten)]
        ttl: TtlArgs,
    },
    /// Remove the entry for KEY.
    Delete { key: String },
}

#[derive(Debug, Default, Args)]
pub struct TtlArgs {
    /// Expire the entry after this many milliseconds.
    #[arg(long, conflicts_with = "infinite")]
    pub ttl_ms: Option<u64>,
    /// Never expire the entry.
    #[arg(long)]
    pub infinite: bool,
}

impl TtlArgs {
    pub fn to_ttl(&self) -> Option<Ttl> {
        if self.infinite {
            Some(Ttl::Infinite)
        } else {
            self.ttl_ms.map(Ttl::from_millis)
        }
    }
}

/// Run a command and return what should be printed.
pub async fn run(cache: &dyn Cache, command: Command) -> anyhow::Result<Option<String>> {
    match command {
        Command::Exists { key } => {
            let exists = cache.exists(&key).await?;
            Ok(Some(exists.to_string()))
        }
        Command::Get { key } => {
            let value = cache.get(&key).await?;
            let value = value.unwrap_or(serde_json::Value::Null);
            Ok(Some(serde_json::to_string_pretty(&value)?))
        }
        Command::Set { key, value, ttl } => {
            let value: serde_json::Value =
                serde_json::from_str(&value).context("payload is not valid JSON")?;
            cache.set(&key, value, ttl.to_ttl()).await?;
            tracing::info!(key = %key, "Entry stored");
            Ok(None)
        }
        Command::Delete { key } => {
            cache.delete(&key).await?;
            tracing::info!(key = %key, "Entry deleted");
            Ok(None)
        }
    }
}
