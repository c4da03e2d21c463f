//! Participant (a player bound to one tournament) and its per-round Scoring records.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a participant.
pub type ParticipantId = Uuid;

/// Result of one round from the participant's own perspective.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    #[default]
    NotPlayed,
    Win,
    Loss,
    Draw,
    /// Joined after this round was paired; scores nothing.
    Absent,
}

impl GameResult {
    /// True once the slot holds a final result.
    pub fn is_recorded(self) -> bool {
        !matches!(self, GameResult::NotPlayed)
    }

    /// The same game seen from the opponent's side.
    pub fn inverse(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            other => other,
        }
    }
}

/// One round's result for one participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    pub round_number: u32,
    /// None means bye (or absent, see `result`).
    pub opponent: Option<ParticipantId>,
    pub result: GameResult,
    /// Handicap received in this game: positive for the weaker side, negative for the stronger.
    #[serde(default)]
    pub handicap: i32,
}

impl Scoring {
    /// Empty slot allocated at participant creation.
    pub fn empty(round_number: u32) -> Self {
        Self {
            round_number,
            opponent: None,
            result: GameResult::NotPlayed,
            handicap: 0,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.opponent.is_none()
            && matches!(self.result, GameResult::Win | GameResult::Draw | GameResult::Loss)
    }
}

/// A player entered into one tournament.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub player_id: PlayerId,
    pub name: String,
    /// Cumulative score under the tournament's point scheme.
    pub score: f64,
    /// Current effective rating; starts at the player's base rating.
    pub rating: i32,
    /// Exactly one slot per round, indexed by round number.
    pub rounds: Vec<Scoring>,
}

impl Participant {
    /// Bind a player to a tournament with `number_of_rounds` empty scoring slots.
    pub fn new(player: &Player, number_of_rounds: u32) -> Self {
        Self::with_id(Uuid::new_v4(), player, number_of_rounds)
    }

    pub fn with_id(id: ParticipantId, player: &Player, number_of_rounds: u32) -> Self {
        Self {
            id,
            player_id: player.id,
            name: player.name.clone(),
            score: 0.0,
            rating: player.rating,
            rounds: (0..number_of_rounds).map(Scoring::empty).collect(),
        }
    }

    pub fn scoring(&self, round_number: u32) -> Option<&Scoring> {
        self.rounds.get(round_number as usize)
    }

    pub fn scoring_mut(&mut self, round_number: u32) -> Option<&mut Scoring> {
        self.rounds.get_mut(round_number as usize)
    }

    /// Whether the slot for `round_number` already holds a result.
    pub fn is_scored(&self, round_number: u32) -> bool {
        self.scoring(round_number)
            .map(|s| s.result.is_recorded())
            .unwrap_or(false)
    }

    /// Opponents already met, derived from the scoring records.
    pub fn opponents(&self) -> HashSet<ParticipantId> {
        self.rounds.iter().filter_map(|s| s.opponent).collect()
    }

    pub fn has_played(&self, other: ParticipantId) -> bool {
        self.rounds.iter().any(|s| s.opponent == Some(other))
    }

    pub fn bye_count(&self) -> usize {
        self.rounds.iter().filter(|s| s.is_bye()).count()
    }

    pub fn wins(&self) -> usize {
        self.rounds
            .iter()
            .filter(|s| s.result == GameResult::Win && s.opponent.is_some())
            .count()
    }
}
