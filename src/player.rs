//! Player identity and per-player game state
//!
//! Players are created by the setup screen, carried through the whole
//! session by the game state machine and finally handed to the results
//! screen. Only the scoring step ever changes a player's score.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use uuid::Uuid;

/// A unique identifier for a player or a setup slot
///
/// Setup slots keep their identifier when they become players, so the UI
/// can keep addressing the same entry across screens.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    /// Creates a new random identifier (same as `new()`)
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Id {
    /// Formats the ID as a UUID string
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Id {
    type Err = uuid::Error;

    /// Parses an ID from a UUID string
    ///
    /// # Errors
    ///
    /// Returns a `uuid::Error` if the string is not a valid UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier, inherited from the setup slot
    pub id: Id,
    /// Display name, trimmed and unique (case-insensitive) within a session
    pub name: String,
    /// Avatar glyph chosen on the setup screen
    pub avatar: String,
    /// Accumulated points
    pub score: u64,
    /// Whether this player is the one currently eligible to answer
    pub is_active: bool,
}

impl Player {
    /// Creates a player with no points who is not yet active
    pub fn new(id: Id, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
            score: 0,
            is_active: false,
        }
    }
}
