//! Process-wide registry of live games.

use std::collections::BTreeMap;
use std::sync::Arc;
use strictly_xox::{Game, GameId, GameSettings, XoxError, XoxErrorKind};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// ID of the fixture game seeded at start-up.
pub const SAMPLE_GAME_ID: u64 = 42;

/// Shared handle to one game. Each game has its own lock, so actions on
/// different games never wait on each other.
pub type GameHandle = Arc<RwLock<Game>>;

#[derive(Debug)]
struct Games {
    /// Next ID to hand out. Only ever grows, so IDs are never reused.
    next_id: u64,
    games: BTreeMap<GameId, GameHandle>,
}

/// Manages all game sessions.
///
/// Cloning is cheap and every clone sees the same games. Structural changes
/// (create, delete) take the map's write lock; lookups and listings take its
/// read lock. The map lock is always released before a game lock is taken.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    inner: Arc<RwLock<Games>>,
}

impl GameRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game registry");
        Self {
            inner: Arc::new(RwLock::new(Games {
                next_id: 1,
                games: BTreeMap::new(),
            })),
        }
    }

    /// Creates a registry holding the fixture game (Max vs. Moritz, ID 42).
    ///
    /// # Errors
    ///
    /// Propagates setup errors from [`GameRegistry::insert_game`].
    #[instrument]
    pub async fn with_sample_game() -> Result<Self, XoxError> {
        let registry = Self::new();
        registry
            .insert_game(GameId::from(SAMPLE_GAME_ID), GameSettings::sample())
            .await?;
        Ok(registry)
    }

    /// Creates a new game and returns its freshly allocated ID.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::InvalidSetup`] if the settings are malformed;
    /// no ID is consumed in that case.
    #[instrument(skip(self, settings))]
    pub async fn create_game(&self, settings: GameSettings) -> Result<GameId, XoxError> {
        let mut inner = self.inner.write().await;

        let id = GameId::from(inner.next_id);
        let game = Game::new(id, settings)?;
        inner.next_id += 1;
        inner.games.insert(id, Arc::new(RwLock::new(game)));

        info!(game_id = %id, live = inner.games.len(), "Created game");
        Ok(id)
    }

    /// Inserts a game under a caller-chosen ID.
    ///
    /// Used to seed fixtures. Later allocations continue above `id`.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::InvalidSetup`] if the settings are malformed
    /// or `id` has already been handed out, whether or not that game is
    /// still live.
    #[instrument(skip(self, settings))]
    pub async fn insert_game(
        &self,
        id: GameId,
        settings: GameSettings,
    ) -> Result<GameId, XoxError> {
        let mut inner = self.inner.write().await;

        if id.value() < inner.next_id {
            warn!(game_id = %id, next_id = inner.next_id, "Game ID already used");
            return Err(XoxError::new(XoxErrorKind::InvalidSetup(format!(
                "game ID {id} has already been used"
            ))));
        }

        let game = Game::new(id, settings)?;
        inner.next_id = inner.next_id.max(id.value() + 1);
        inner.games.insert(id, Arc::new(RwLock::new(game)));

        info!(game_id = %id, "Inserted game");
        Ok(id)
    }

    /// Lists all live game IDs in ascending order.
    #[instrument(skip(self))]
    pub async fn list_game_ids(&self) -> Vec<GameId> {
        let inner = self.inner.read().await;
        let ids: Vec<_> = inner.games.keys().copied().collect();
        debug!(count = ids.len(), "Listed games");
        ids
    }

    /// Gets the handle of a live game.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::GameNotFound`] if no live game has this ID.
    #[instrument(skip(self))]
    pub async fn get_game(&self, id: GameId) -> Result<GameHandle, XoxError> {
        let inner = self.inner.read().await;
        inner.games.get(&id).cloned().ok_or_else(|| {
            debug!(game_id = %id, "Game not found");
            XoxError::new(XoxErrorKind::GameNotFound(id))
        })
    }

    /// Removes a game.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::GameNotFound`] if no live game has this ID,
    /// including when it has already been deleted.
    #[instrument(skip(self))]
    pub async fn delete_game(&self, id: GameId) -> Result<(), XoxError> {
        let mut inner = self.inner.write().await;
        match inner.games.remove(&id) {
            Some(_) => {
                info!(game_id = %id, live = inner.games.len(), "Deleted game");
                Ok(())
            }
            None => {
                warn!(game_id = %id, "Delete of unknown game");
                Err(XoxError::new(XoxErrorKind::GameNotFound(id)))
            }
        }
    }

    /// Runs a read-only query against a consistent view of one game.
    ///
    /// The game's read lock is held while `f` runs, so `f` never observes a
    /// half-applied action.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::GameNotFound`] if no live game has this ID.
    pub async fn with_game<T>(
        &self,
        id: GameId,
        f: impl FnOnce(&Game) -> T,
    ) -> Result<T, XoxError> {
        let handle = self.get_game(id).await?;
        let game = handle.read().await;
        Ok(f(&game))
    }

    /// Like [`GameRegistry::with_game`], for queries that can fail.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::GameNotFound`] or whatever `f` returns.
    pub async fn try_with_game<T>(
        &self,
        id: GameId,
        f: impl FnOnce(&Game) -> Result<T, XoxError>,
    ) -> Result<T, XoxError> {
        let handle = self.get_game(id).await?;
        let game = handle.read().await;
        f(&game)
    }

    /// Executes an action and returns a snapshot of the game afterwards.
    ///
    /// The game's write lock is held for the whole check-claim-advance
    /// sequence, so concurrent actions on one game apply one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`XoxErrorKind::GameNotFound`] or any error from
    /// [`Game::execute_action`]; the game is unchanged on error.
    #[instrument(skip(self))]
    pub async fn execute_action(
        &self,
        id: GameId,
        player_name: &str,
        action_id: &str,
    ) -> Result<Game, XoxError> {
        let handle = self.get_game(id).await?;
        let mut game = handle.write().await;
        game.execute_action(player_name, action_id)?;
        Ok(game.clone())
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
