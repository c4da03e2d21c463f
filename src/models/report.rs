//! What a recorded result changed, per side.

use crate::models::participant::{ParticipantId, Scoring};
use crate::models::tournament::TournamentStatus;
use serde::{Deserialize, Serialize};

/// One participant's state after a result was folded in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredSide {
    pub participant_id: ParticipantId,
    pub scoring: Scoring,
    pub score: f64,
    pub rating: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultReport {
    pub round_number: u32,
    /// One entry for a bye, two for a game.
    pub sides: Vec<ScoredSide>,
    /// Status after the result; Completed once the last round is fully scored.
    pub status: TournamentStatus,
}
