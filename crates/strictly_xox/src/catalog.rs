//! Legal-action enumeration and execution.
//!
//! Each precondition is its own small check so the order in which a request
//! is refused is explicit: unknown player, finished game, unknown or taken
//! cell, then turn order. All checks run before the board is touched, so a
//! refused action leaves the game exactly as it was.

use crate::action::{ActionId, LegalActions};
use crate::error::{XoxError, XoxErrorKind};
use crate::{Board, Game, Mark, Square};
use tracing::{debug, info, instrument, warn};

/// Precondition: the player takes part in the game.
pub struct PlayerKnown;

impl PlayerKnown {
    /// Resolves the player's mark.
    #[track_caller]
    #[instrument(skip(game))]
    pub fn check(game: &Game, player_name: &str) -> Result<Mark, XoxError> {
        game.mark_of(player_name)
            .ok_or_else(|| XoxError::new(XoxErrorKind::UnknownPlayer(player_name.to_string())))
    }
}

/// Precondition: the game has not been won or drawn.
pub struct GameRunning;

impl GameRunning {
    /// Fails with [`XoxErrorKind::GameOver`] on a finished game.
    #[track_caller]
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), XoxError> {
        if game.is_over() {
            Err(XoxError::new(XoxErrorKind::GameOver))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the action names a cell that is still free.
pub struct CellIsFree;

impl CellIsFree {
    /// Parses the action ID and checks its cell.
    #[track_caller]
    #[instrument(skip(game))]
    pub fn check(game: &Game, action_id: &str) -> Result<ActionId, XoxError> {
        let id: ActionId = action_id.parse()?;
        if game.board().is_free(id.position()) {
            Ok(id)
        } else {
            Err(XoxError::new(XoxErrorKind::UnknownAction(
                action_id.to_string(),
            )))
        }
    }
}

/// Precondition: it is the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`XoxErrorKind::NotPlayersTurn`] unless `mark` is on turn.
    #[track_caller]
    #[instrument(skip(game))]
    pub fn check(game: &Game, player_name: &str, mark: Mark) -> Result<(), XoxError> {
        if game.current_mark() == mark {
            Ok(())
        } else {
            Err(XoxError::new(XoxErrorKind::NotPlayersTurn(
                player_name.to_string(),
            )))
        }
    }
}

/// Composite precondition for executing an action.
pub struct LegalAction;

impl LegalAction {
    /// Validates all preconditions, returning the acting mark and target.
    pub fn check(
        game: &Game,
        player_name: &str,
        action_id: &str,
    ) -> Result<(Mark, ActionId), XoxError> {
        let mark = PlayerKnown::check(game, player_name)?;
        GameRunning::check(game)?;
        let id = CellIsFree::check(game, action_id)?;
        PlayersTurn::check(game, player_name, mark)?;
        Ok((mark, id))
    }
}

/// Lists the actions `player_name` may take right now.
///
/// The player on turn sees one action per free cell; everyone else, and
/// everyone once the game is over, sees none.
///
/// # Errors
///
/// Returns [`XoxErrorKind::UnknownPlayer`] if the name is not in the game.
#[instrument(skip(game), fields(game_id = %game.id()))]
pub fn legal_actions<'a>(game: &'a Game, player_name: &str) -> Result<LegalActions<'a>, XoxError> {
    let mark = PlayerKnown::check(game, player_name)?;
    if game.is_over() || game.current_mark() != mark {
        debug!(?mark, current = ?game.current_mark(), "No actions for player");
        return Ok(LegalActions::none(game.board()));
    }
    Ok(LegalActions::new(game.board(), true))
}

/// Executes the action `action_id` for `player_name`.
///
/// Claims the target cell and records the move. The turn passes to the
/// opponent unless the claim ended the game. Returns the board after the
/// claim.
///
/// # Errors
///
/// In order of precedence: [`XoxErrorKind::UnknownPlayer`],
/// [`XoxErrorKind::GameOver`], [`XoxErrorKind::UnknownAction`],
/// [`XoxErrorKind::NotPlayersTurn`]. On error the game is unchanged.
#[instrument(skip(game), fields(game_id = %game.id()))]
pub fn execute_action<'a>(
    game: &'a mut Game,
    player_name: &str,
    action_id: &str,
) -> Result<&'a Board, XoxError> {
    let (mark, id) = LegalAction::check(game, player_name, action_id).inspect_err(|e| {
        warn!(error = %e.kind(), "Action rejected");
    })?;

    game.apply_claim(id.position(), mark)?;
    debug_assert!(BoardConsistent::holds(game.board()), "Board consistency violated");
    debug_assert!(HistoryComplete::holds(game), "History completeness violated");

    info!(
        position = %id.position(),
        status = ?game.status(),
        "Action executed"
    );
    Ok(game.board())
}

/// Invariant: the two marks' claim counts differ by at most one.
pub struct BoardConsistent;

impl BoardConsistent {
    /// Checks the invariant.
    pub fn holds(board: &Board) -> bool {
        let count = |mark| {
            board
                .squares()
                .iter()
                .filter(|s| **s == Square::Occupied(mark))
                .count()
        };
        count(Mark::X).abs_diff(count(Mark::O)) <= 1
    }
}

/// Invariant: history length matches claimed cells.
pub struct HistoryComplete;

impl HistoryComplete {
    /// Checks the invariant.
    pub fn holds(game: &Game) -> bool {
        9 - game.board().free_count() == game.history().len()
    }
}
