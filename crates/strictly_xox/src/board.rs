//! The 3x3 board and its ownership invariants.

use crate::error::{XoxError, XoxErrorKind};
use crate::{Mark, Position, rules};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Unclaimed cell.
    Empty,
    /// Cell claimed by a mark.
    Occupied(Mark),
}

/// 3x3 xox board.
///
/// Cells only ever go from [`Square::Empty`] to [`Square::Occupied`]; there is
/// no way to clear or overwrite a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Returns the mark owning a cell, if any.
    pub fn owner(&self, pos: Position) -> Option<Mark> {
        match self.get(pos) {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }

    /// Claims a cell for `mark`.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::IllegalMove`] if the cell is already owned.
    #[instrument(skip(self))]
    pub fn claim(&mut self, pos: Position, mark: Mark) -> Result<(), XoxError> {
        if let Square::Occupied(owner) = self.get(pos) {
            warn!(position = %pos, ?owner, "Claim on owned cell");
            return Err(XoxError::new(XoxErrorKind::IllegalMove(pos)));
        }
        self.squares[pos.to_index()] = Square::Occupied(mark);
        Ok(())
    }

    /// Checks if a cell is unclaimed.
    pub fn is_free(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks if no cell has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(|s| *s == Square::Empty)
    }

    /// Checks if every cell has been claimed.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Checks if any row, column or diagonal is owned by a single mark.
    pub fn is_three_in_a_line(&self) -> bool {
        self.winner().is_some()
    }

    /// Returns the mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        rules::check_winner(self)
    }

    /// Iterates over unclaimed cells in row-major order.
    pub fn free_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_free(*pos))
    }

    /// Number of unclaimed cells.
    pub fn free_count(&self) -> usize {
        self.free_positions().count()
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert!(!board.is_three_in_a_line());
        assert_eq!(board.free_count(), 9);
    }

    #[test]
    fn claimed_cell_cannot_be_reclaimed() {
        let mut board = Board::new();
        board.claim(Position::Center, Mark::X).unwrap();

        let err = board.claim(Position::Center, Mark::O).unwrap_err();
        assert_eq!(err.kind(), &XoxErrorKind::IllegalMove(Position::Center));
        assert_eq!(board.owner(Position::Center), Some(Mark::X));

        let err = board.claim(Position::Center, Mark::X).unwrap_err();
        assert_eq!(err.kind(), &XoxErrorKind::IllegalMove(Position::Center));
    }
}
