//! Strictly Xox server - REST access to concurrent xox games.
//!
//! # Architecture
//!
//! - **Registry**: process-wide map of live games, one lock per game
//! - **API**: axum router exposing games, boards, players, actions and rankings
//! - **Config**: TOML file plus command-line overrides
//!
//! # Example
//!
//! ```no_run
//! use strictly_xox_server::{GameRegistry, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = GameRegistry::with_sample_game().await?;
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 8080)).await?;
//! axum::serve(listener, router(registry)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod error;
mod registry;

pub use api::{ActionView, BoardView, MoveView, RankingView, ScoreView, router};
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use registry::{GameHandle, GameRegistry, SAMPLE_GAME_ID};
