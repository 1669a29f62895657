//! Strictly Xox - game server binary.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_xox_server::{GameRegistry, ServerConfig, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            no_sample_game,
        } => {
            init_tracing();
            let config = ServerConfig::load(config.as_deref())?
                .with_overrides(host, port, no_sample_game);
            run_http_server(config).await
        }
        Command::ShowConfig { config } => show_config(config),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    EnvFilter::new("info,strictly_xox=debug,strictly_xox_server=debug")
                }),
        )
        .init();
}

/// Run the HTTP game server until Ctrl+C.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    info!("Starting Strictly Xox server");

    let registry = if *config.sample_game() {
        GameRegistry::with_sample_game().await?
    } else {
        GameRegistry::new()
    };

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, router(registry))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Print the effective configuration.
fn show_config(path: Option<PathBuf>) -> Result<()> {
    let config = ServerConfig::load(path.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}
