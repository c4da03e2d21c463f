//! Data structures for the pairing engine: players, participants, games, configuration.

mod config;
mod game;
mod participant;
mod player;
mod report;
mod standing;
mod tournament;

pub use config::{PointScheme, RatingPolicy, TieBreak, TournamentConfig};
pub use game::{Game, PairingDiagnostic, RoundPairing};
pub use participant::{GameResult, Participant, ParticipantId, Scoring};
pub use player::{Player, PlayerId};
pub use report::{ResultReport, ScoredSide};
pub use standing::Standing;
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
