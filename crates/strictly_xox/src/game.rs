//! The per-session game state machine.

use crate::action::{LegalActions, Move};
use crate::error::{XoxError, XoxErrorKind};
use crate::{Board, GameId, GameSettings, Mark, Player, Position, Ranking, catalog};
use tracing::{info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Board filled up without a line.
    Drawn,
}

impl GameStatus {
    /// Checks if the status is terminal.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// One xox game: two players, a board, and whose turn it is.
///
/// The status is never stored; it is derived from the board on every call,
/// so it cannot drift from the cells. The only way to change a game is
/// [`Game::execute_action`].
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    players: [Player; 2],
    board: Board,
    current: Mark,
    starting: Mark,
    history: Vec<Move>,
}

impl Game {
    /// Sets up a new game.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::InvalidSetup`] unless there are exactly two
    /// players with distinct, non-empty names and the starting player is one
    /// of them.
    #[instrument(skip(settings), fields(starting = %settings.starting_player_name()))]
    pub fn new(id: GameId, settings: GameSettings) -> Result<Self, XoxError> {
        let (players, starting_name) = settings.into_parts();

        let count = players.len();
        let players: [Player; 2] = players.try_into().map_err(|_| {
            warn!(count, "Wrong number of players");
            invalid_setup(format!("expected exactly 2 players, got {count}"))
        })?;

        if let Some(player) = players.iter().find(|p| p.name().trim().is_empty()) {
            warn!(colour = %player.preferred_colour(), "Player without a name");
            return Err(invalid_setup("player names must not be empty"));
        }
        if players[0].name() == players[1].name() {
            warn!(name = %players[0].name(), "Duplicate player name");
            return Err(invalid_setup(format!(
                "player name '{}' used twice",
                players[0].name()
            )));
        }

        let starting = [Mark::X, Mark::O]
            .into_iter()
            .find(|mark| players[mark.seat()].name() == &starting_name)
            .ok_or_else(|| {
                warn!(starting = %starting_name, "Starting player not in game");
                invalid_setup(format!("starting player '{starting_name}' is not a player"))
            })?;

        info!(
            first = %players[0].name(),
            second = %players[1].name(),
            ?starting,
            "Game created"
        );
        Ok(Self {
            id,
            players,
            board: Board::new(),
            current: starting,
            starting,
            history: Vec::new(),
        })
    }

    /// Returns the game ID.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Players in configured order.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Returns the player holding `mark`.
    pub fn player(&self, mark: Mark) -> &Player {
        &self.players[mark.seat()]
    }

    /// Looks up a player's mark by name.
    pub fn mark_of(&self, name: &str) -> Option<Mark> {
        [Mark::X, Mark::O]
            .into_iter()
            .find(|mark| self.player(*mark).name() == name)
    }

    /// Looks up a player by name.
    pub fn player_named(&self, name: &str) -> Option<&Player> {
        self.mark_of(name).map(|mark| self.player(mark))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark of the player on turn.
    pub fn current_mark(&self) -> Mark {
        self.current
    }

    /// The player on turn.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// The player who moved first.
    pub fn starting_player(&self) -> &Player {
        self.player(self.starting)
    }

    /// Executed moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        if let Some(mark) = self.board.winner() {
            GameStatus::Won(mark)
        } else if self.board.is_full() {
            GameStatus::Drawn
        } else {
            GameStatus::InProgress
        }
    }

    /// Checks if the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// The winning player, if the game has been won.
    pub fn winner(&self) -> Option<&Player> {
        match self.status() {
            GameStatus::Won(mark) => Some(self.player(mark)),
            GameStatus::InProgress | GameStatus::Drawn => None,
        }
    }

    /// Lists the actions `player_name` may take right now.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::UnknownPlayer`] if the name is not in the game.
    pub fn legal_actions(&self, player_name: &str) -> Result<LegalActions<'_>, XoxError> {
        catalog::legal_actions(self, player_name)
    }

    /// Executes an action for `player_name` and returns the updated board.
    ///
    /// # Errors
    ///
    /// See [`catalog::execute_action`]. On error the game is unchanged.
    pub fn execute_action(
        &mut self,
        player_name: &str,
        action_id: &str,
    ) -> Result<&Board, XoxError> {
        catalog::execute_action(self, player_name, action_id)
    }

    /// Ranking view of this game.
    pub fn ranking(&self) -> Ranking<'_> {
        Ranking::new(self)
    }

    /// Claims a cell and passes the turn, unless the claim ended the game.
    /// Callers validate first.
    pub(crate) fn apply_claim(&mut self, pos: Position, mark: Mark) -> Result<(), XoxError> {
        self.board.claim(pos, mark)?;
        self.history.push(Move::new(mark, pos));
        if !self.is_over() {
            self.current = mark.opponent();
        }
        Ok(())
    }
}

#[track_caller]
fn invalid_setup(reason: impl Into<String>) -> XoxError {
    XoxError::new(XoxErrorKind::InvalidSetup(reason.into()))
}
