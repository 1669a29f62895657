//! First-class action types for xox.
//!
//! An [`Action`] is a candidate move offered to the player on turn; a
//! [`Move`] is an action that has been executed and recorded in the game
//! history.

use crate::error::{XoxError, XoxErrorKind};
use crate::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable identifier of a claim action.
///
/// The identifier is the target cell's row-major index, rendered as a
/// decimal string (`"0"` to `"8"`). It depends only on the cell, so the same
/// cell always yields the same ID and no two cells share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ActionId(Position);

impl ActionId {
    /// The cell this action targets.
    pub fn position(self) -> Position {
        self.0
    }
}

impl From<Position> for ActionId {
    fn from(pos: Position) -> Self {
        Self(pos)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_index())
    }
}

impl FromStr for ActionId {
    type Err = XoxError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = match s.as_bytes() {
            [digit @ b'0'..=b'8'] => Some(usize::from(digit - b'0')),
            _ => None,
        };
        index
            .and_then(Position::from_index)
            .map(Self)
            .ok_or_else(|| XoxError::new(XoxErrorKind::UnknownAction(s.to_string())))
    }
}

impl From<ActionId> for String {
    fn from(id: ActionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ActionId {
    type Error = XoxError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A candidate move: claim one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    id: ActionId,
}

impl Action {
    /// Creates the action claiming `position`.
    pub fn claim(position: Position) -> Self {
        Self {
            id: ActionId::from(position),
        }
    }

    /// Identifier clients use to execute this action.
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// Target cell.
    pub fn position(&self) -> Position {
        self.id.position()
    }
}

/// An executed action: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// The cell that was claimed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }
}

/// The legal actions for one player in one game state.
///
/// This is a borrowed view: it holds no actions of its own and can be
/// iterated any number of times. It is empty unless the requesting player is
/// on turn in a game that is still running.
#[derive(Debug, Clone, Copy)]
pub struct LegalActions<'a> {
    board: &'a Board,
    active: bool,
}

impl<'a> LegalActions<'a> {
    pub(crate) fn new(board: &'a Board, active: bool) -> Self {
        Self { board, active }
    }

    /// The empty sequence.
    pub(crate) fn none(board: &'a Board) -> Self {
        Self::new(board, false)
    }

    /// Iterates over the actions, one per free cell, in row-major order.
    pub fn iter(&self) -> LegalActionsIter<'a> {
        LegalActionsIter {
            board: self.board,
            next: if self.active { 0 } else { Position::ALL.len() },
        }
    }

    /// Number of legal actions.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Checks if there are no legal actions.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Looks up the action with the given ID among the legal ones.
    pub fn find(&self, id: ActionId) -> Option<Action> {
        self.iter().find(|action| action.id() == id)
    }
}

/// Iterator over [`LegalActions`].
#[derive(Debug, Clone)]
pub struct LegalActionsIter<'a> {
    board: &'a Board,
    next: usize,
}

impl Iterator for LegalActionsIter<'_> {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        while let Some(&pos) = Position::ALL.get(self.next) {
            self.next += 1;
            if self.board.is_free(pos) {
                return Some(Action::claim(pos));
            }
        }
        None
    }
}

impl<'a> IntoIterator for LegalActions<'a> {
    type Item = Action;
    type IntoIter = LegalActionsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &LegalActions<'a> {
    type Item = Action;
    type IntoIter = LegalActionsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
