//! Error types for xox games.

use crate::{GameId, Position};
use derive_more::{Display, Error};
use tracing::instrument;

/// The kinds of failure a game operation can report.
///
/// The boundary layer maps each kind to a client-facing status, so kinds
/// stay coarse: one per distinct reason a request can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum XoxErrorKind {
    /// Game creation request was malformed.
    #[display("Invalid game setup: {}", _0)]
    InvalidSetup(String),

    /// No live game has this ID.
    #[display("Game {} not found", _0)]
    GameNotFound(GameId),

    /// The named player does not take part in the game.
    #[display("Player '{}' is not part of this game", _0)]
    UnknownPlayer(String),

    /// The named player tried to act out of turn.
    #[display("It's not {}'s turn", _0)]
    NotPlayersTurn(String),

    /// The action ID does not name a free cell.
    #[display("Unknown action '{}'", _0)]
    UnknownAction(String),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// A claim hit a cell that is already owned.
    #[display("Cell {} is already claimed", _0)]
    IllegalMove(Position),
}

/// Xox error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Xox error: {} at {}:{}", kind, file, line)]
pub struct XoxError {
    /// What went wrong.
    pub kind: XoxErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl XoxError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: XoxErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &XoxErrorKind {
        &self.kind
    }
}

impl From<XoxErrorKind> for XoxError {
    #[track_caller]
    fn from(kind: XoxErrorKind) -> Self {
        Self::new(kind)
    }
}
