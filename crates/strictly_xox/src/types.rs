//! Core domain types for xox.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Unique identifier of a game session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    /// Returns the raw numeric ID.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// The seat a player occupies on the board.
///
/// `X` belongs to the first configured player, `O` to the second.
/// Which of them moves first is a game setting, not a property of the mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// First configured player.
    X,
    /// Second configured player.
    O,
}

impl Mark {
    /// Returns the opponent mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Index of the owning player in the game's player list.
    pub fn seat(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

/// A participant in a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Name, unique within a game.
    name: String,
    /// Display colour, e.g. `#CAFFEE`. Opaque to the engine.
    preferred_colour: String,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: impl Into<String>, preferred_colour: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preferred_colour: preferred_colour.into(),
        }
    }
}

/// Request to set up a new game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    /// Players in seating order.
    players: Vec<Player>,
    /// Name of the player who moves first.
    starting_player_name: String,
}

impl GameSettings {
    /// Creates new game settings.
    pub fn new(players: Vec<Player>, starting_player_name: impl Into<String>) -> Self {
        Self {
            players,
            starting_player_name: starting_player_name.into(),
        }
    }

    /// Splits the settings into players and starting player name.
    pub fn into_parts(self) -> (Vec<Player>, String) {
        (self.players, self.starting_player_name)
    }

    /// The fixture game: Max (`#CAFFEE`) against Moritz (`#1CE7EA`), Max first.
    pub fn sample() -> Self {
        Self::new(
            vec![
                Player::new("Max", "#CAFFEE"),
                Player::new("Moritz", "#1CE7EA"),
            ],
            "Max",
        )
    }
}
