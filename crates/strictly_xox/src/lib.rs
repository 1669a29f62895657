//! Strictly Xox - pure game logic for two-player xox (tic-tac-toe).
//!
//! # Architecture
//!
//! - **Board**: 3x3 cell ownership with win/draw detection
//! - **Game**: players, turn pointer and move history; the state machine
//! - **Catalog**: which actions a player may take, and executing them
//! - **Ranking**: derived game-over flag and per-player score
//!
//! Nothing here knows about transport or concurrency; the server crate
//! wraps each [`Game`] in its own lock.
//!
//! # Example
//!
//! ```
//! use strictly_xox::{Game, GameId, GameSettings};
//!
//! # fn example() -> Result<(), strictly_xox::XoxError> {
//! let mut game = Game::new(GameId::from(1), GameSettings::sample())?;
//! assert_eq!(game.legal_actions("Max")?.len(), 9);
//! assert!(game.legal_actions("Moritz")?.is_empty());
//!
//! game.execute_action("Max", "4")?;
//! assert_eq!(game.legal_actions("Moritz")?.len(), 8);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod catalog;
mod error;
mod game;
mod position;
mod ranking;
pub mod rules;
mod types;

pub use action::{Action, ActionId, LegalActions, LegalActionsIter, Move};
pub use board::{Board, Square};
pub use error::{XoxError, XoxErrorKind};
pub use game::{Game, GameStatus};
pub use position::Position;
pub use ranking::{Ranking, WIN_SCORE};
pub use types::{GameId, GameSettings, Mark, Player};
