//! REST API over the game registry.
//!
//! Routes live at the service root:
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | `GET` | `/` | list game IDs |
//! | `POST` | `/` | create a game, returns the new ID |
//! | `GET` | `/{id}` | ranking |
//! | `DELETE` | `/{id}` | delete the game |
//! | `GET` | `/{id}/board` | board |
//! | `GET` | `/{id}/players` | players in configured order |
//! | `GET` | `/{id}/players/{player}/actions` | legal actions for a player |
//! | `POST` | `/{id}/players/{player}/actions/{action}` | execute an action |
//! | `GET` | `/{id}/history` | executed moves |

use crate::error::ApiError;
use crate::registry::GameRegistry;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_xox::{ActionId, Game, GameId, GameSettings, Player, Position};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Ranking of one game as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct RankingView {
    /// Whether the game has been won or drawn.
    pub game_over: bool,
    /// Scores in configured player order.
    pub scores: Vec<ScoreView>,
}

/// One player's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ScoreView {
    /// Player name.
    pub name: String,
    /// Current score.
    pub score: u32,
}

impl From<&Game> for RankingView {
    fn from(game: &Game) -> Self {
        let ranking = game.ranking();
        Self::new(
            ranking.is_game_over(),
            ranking
                .scores()
                .map(|(player, score)| ScoreView::new(player.name().clone(), score))
                .collect(),
        )
    }
}

/// Board as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    /// No cell is claimed.
    pub empty: bool,
    /// Every cell is claimed.
    pub full: bool,
    /// Some row, column or diagonal belongs to one player.
    pub three_in_a_line: bool,
    /// Owner names indexed as `cells[x][y]`; `None` for free cells.
    pub cells: [[Option<String>; 3]; 3],
}

impl BoardView {
    /// Checks if the cell at column `x`, row `y` is free.
    pub fn is_free(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(x)
            .and_then(|column| column.get(y))
            .is_some_and(Option::is_none)
    }
}

impl From<&Game> for BoardView {
    fn from(game: &Game) -> Self {
        let board = game.board();
        let cells = std::array::from_fn(|x| {
            std::array::from_fn(|y| {
                Position::from_coords(x, y)
                    .and_then(|pos| board.owner(pos))
                    .map(|mark| game.player(mark).name().clone())
            })
        });
        Self {
            empty: board.is_empty(),
            full: board.is_full(),
            three_in_a_line: board.is_three_in_a_line(),
            cells,
        }
    }
}

/// A legal action as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ActionView {
    /// ID to post back when executing the action.
    pub id: ActionId,
    /// Target column.
    pub x: usize,
    /// Target row.
    pub y: usize,
}

/// An executed move as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveView {
    /// Name of the player who moved.
    pub player: String,
    /// Claimed column.
    pub x: usize,
    /// Claimed row.
    pub y: usize,
}

/// Builds the router with request logging.
pub fn router(registry: GameRegistry) -> Router {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/{id}", get(get_ranking).delete(delete_game))
        .route("/{id}/board", get(get_board))
        .route("/{id}/players", get(get_players))
        .route("/{id}/players/{player}/actions", get(get_actions))
        .route(
            "/{id}/players/{player}/actions/{action}",
            post(execute_action),
        )
        .route("/{id}/history", get(get_history))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(registry)
}

fn log_request(req: Request) -> Request {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

#[instrument(skip(registry))]
async fn list_games(State(registry): State<GameRegistry>) -> Json<Vec<GameId>> {
    Json(registry.list_game_ids().await)
}

#[instrument(skip(registry, settings))]
async fn create_game(
    State(registry): State<GameRegistry>,
    Json(settings): Json<GameSettings>,
) -> Result<String, ApiError> {
    let id = registry.create_game(settings).await?;
    Ok(id.to_string())
}

#[instrument(skip(registry))]
async fn get_ranking(
    State(registry): State<GameRegistry>,
    Path(id): Path<GameId>,
) -> Result<Json<RankingView>, ApiError> {
    Ok(Json(registry.with_game(id, |game| RankingView::from(game)).await?))
}

#[instrument(skip(registry))]
async fn delete_game(
    State(registry): State<GameRegistry>,
    Path(id): Path<GameId>,
) -> Result<StatusCode, ApiError> {
    registry.delete_game(id).await?;
    Ok(StatusCode::OK)
}

#[instrument(skip(registry))]
async fn get_board(
    State(registry): State<GameRegistry>,
    Path(id): Path<GameId>,
) -> Result<Json<BoardView>, ApiError> {
    Ok(Json(registry.with_game(id, |game| BoardView::from(game)).await?))
}

#[instrument(skip(registry))]
async fn get_players(
    State(registry): State<GameRegistry>,
    Path(id): Path<GameId>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = registry
        .with_game(id, |game| game.players().to_vec())
        .await?;
    Ok(Json(players))
}

#[instrument(skip(registry))]
async fn get_actions(
    State(registry): State<GameRegistry>,
    Path((id, player)): Path<(GameId, String)>,
) -> Result<Json<Vec<ActionView>>, ApiError> {
    let actions = registry
        .try_with_game(id, |game| {
            Ok(game
                .legal_actions(&player)?
                .iter()
                .map(|action| {
                    let pos = action.position();
                    ActionView::new(action.id(), pos.x(), pos.y())
                })
                .collect::<Vec<_>>())
        })
        .await?;
    debug!(count = actions.len(), "Listed actions");
    Ok(Json(actions))
}

#[instrument(skip(registry))]
async fn execute_action(
    State(registry): State<GameRegistry>,
    Path((id, player, action)): Path<(GameId, String, String)>,
) -> Result<Json<BoardView>, ApiError> {
    let game = registry.execute_action(id, &player, &action).await?;
    Ok(Json(BoardView::from(&game)))
}

#[instrument(skip(registry))]
async fn get_history(
    State(registry): State<GameRegistry>,
    Path(id): Path<GameId>,
) -> Result<Json<Vec<MoveView>>, ApiError> {
    let moves = registry
        .with_game(id, |game| {
            game.history()
                .iter()
                .map(|mv| {
                    MoveView::new(
                        game.player(mv.mark).name().clone(),
                        mv.position.x(),
                        mv.position.y(),
                    )
                })
                .collect::<Vec<_>>()
        })
        .await?;
    Ok(Json(moves))
}
