//! Game, RoundPairing, and the diagnostics a relaxed pairing carries.

use crate::models::participant::{GameResult, ParticipantId};
use serde::{Deserialize, Serialize};

/// One pairing's game for one round. `result` is read from `first`'s side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub round_number: u32,
    pub first: ParticipantId,
    pub second: ParticipantId,
    /// Handicap received by `first` (negative when `second` receives it).
    pub handicap: i32,
    pub result: GameResult,
}

impl Game {
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.first == id || self.second == id
    }
}

/// Why a pairing had to bend a constraint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PairingDiagnostic {
    /// No matching satisfied every hard constraint; the pairs below were forced.
    NoLegalPairing,
    RepeatPairForced {
        first: ParticipantId,
        second: ParticipantId,
    },
    RatingBarExceeded {
        first: ParticipantId,
        second: ParticipantId,
        gap: i32,
    },
}

/// Output of the pairing engine for one round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundPairing {
    pub round_number: u32,
    /// Disjoint pairs, higher-ranked side first.
    pub pairs: Vec<(ParticipantId, ParticipantId)>,
    pub bye: Option<ParticipantId>,
    pub diagnostics: Vec<PairingDiagnostic>,
}

impl RoundPairing {
    /// True when any constraint was relaxed to complete the round.
    pub fn is_relaxed(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Every participant this pairing places, bye included.
    pub fn participant_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.pairs
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .chain(self.bye)
    }
}
