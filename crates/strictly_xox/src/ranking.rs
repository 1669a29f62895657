//! Derived scoring view over a game.

use crate::error::{XoxError, XoxErrorKind};
use crate::{Game, Player};

/// Score credited to the winner of a game.
///
/// Losers, drawn games and unfinished games score zero.
pub const WIN_SCORE: u32 = 1;

/// Read-only ranking of one game.
///
/// Nothing is stored: every query reads the game it borrows, so a ranking
/// always reflects the latest executed action.
#[derive(Debug, Clone, Copy)]
pub struct Ranking<'a> {
    game: &'a Game,
}

impl<'a> Ranking<'a> {
    /// Creates the ranking view for `game`.
    pub fn new(game: &'a Game) -> Self {
        Self { game }
    }

    /// Checks if the game has been won or drawn.
    pub fn is_game_over(&self) -> bool {
        self.game.is_over()
    }

    /// Current score of the named player.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::UnknownPlayer`] if the name is not in the game.
    #[track_caller]
    pub fn score_for_player(&self, name: &str) -> Result<u32, XoxError> {
        let mark = self
            .game
            .mark_of(name)
            .ok_or_else(|| XoxError::new(XoxErrorKind::UnknownPlayer(name.to_string())))?;
        Ok(self.score_for(self.game.player(mark)))
    }

    /// Every player with their score, in configured order.
    pub fn scores(&self) -> impl Iterator<Item = (&'a Player, u32)> + '_ {
        self.game
            .players()
            .iter()
            .map(|player| (player, self.score_for(player)))
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<&'a Player> {
        self.game.winner()
    }

    fn score_for(&self, player: &Player) -> u32 {
        match self.game.winner() {
            Some(winner) if winner == player => WIN_SCORE,
            _ => 0,
        }
    }
}
