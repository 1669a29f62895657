//! Command-line interface for strictly_xox_server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Xox - REST game server for two-player xox
#[derive(Parser, Debug)]
#[command(name = "strictly_xox_server")]
#[command(about = "REST game server for two-player xox", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Start without the sample game
        #[arg(long)]
        no_sample_game: bool,
    },

    /// Print the effective configuration as TOML
    ShowConfig {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
