//! # Lunchly Main Entry Point
//!
//! Serves the reservation manager, or applies database migrations and exits.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lunchly::{config::ConfigLoader, db, server::run_server, telemetry};

/// Restaurant reservation manager.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Default)]
enum Command {
    /// Start the HTTP server (default).
    #[default]
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .load()
        .context("Failed to load configuration")?;

    telemetry::init_tracing(&config).context("Failed to initialize tracing")?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("Failed to initialize database connection pool")?;

    match cli.command.unwrap_or_default() {
        Command::Migrate => db::run_migrations(&db).await,
        Command::Serve => {
            if config.run_migrations {
                db::run_migrations(&db).await?;
            }
            run_server(config, db).await
        }
    }
}
