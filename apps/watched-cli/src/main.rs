//! # Watched CLI
//!
//! Command-line access to the watched cache.

use clap::Parser;

mod commands;
mod config;
mod state;
mod telemetry;

use commands::Command;
use config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "watched-cli", version, about = "Inspect and edit the watched cache")]
struct Cli {
    /// Emit JSON logs (overrides LOG_FORMAT).
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    telemetry::init_telemetry(cli.json_logs || config.json_logs);

    let cache = state::build_cache(&config);

    if let Some(output) = commands::run(cache.as_ref(), cli.command).await? {
        println!("{output}");
    }

    Ok(())
}
