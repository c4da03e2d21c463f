//! Player: identity and base rating, shared across tournaments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (referenced by participants in any number of tournaments).
pub type PlayerId = Uuid;

/// A registered player. Not owned by any tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Base rank/rating (kyu negative, dan positive in go-style encodings).
    pub rating: i32,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating,
        }
    }

    /// Create a player with a caller-supplied id (e.g. mapped from a storage key).
    pub fn with_id(id: PlayerId, name: impl Into<String>, rating: i32) -> Self {
        Self {
            id,
            name: name.into(),
            rating,
        }
    }

    /// Explicit rating correction; the only sanctioned mutation of a player.
    pub fn correct_rating(&mut self, rating: i32) {
        self.rating = rating;
    }
}
