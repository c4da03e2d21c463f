//! McMahon/Swiss pairing and scoring engine: models and pure tournament logic.
//!
//! The caller owns storage and transport. Every operation takes an explicit
//! snapshot and returns its result; nothing here performs I/O.

pub mod logic;
pub mod models;

pub use logic::{
    current_standings, effective_rating, final_standings, handicap, is_legal_pair, pair_next_round,
    pair_quality, pair_round, pair_round_with_budget, rank_for_pairing, record_result, standings, submit_result,
};
pub use models::{
    Game, GameResult, PairingDiagnostic, Participant, ParticipantId, Player, PlayerId, PointScheme,
    RatingPolicy, ResultReport, RoundPairing, ScoredSide, Scoring, Standing, TieBreak, Tournament,
    TournamentConfig, TournamentError, TournamentId, TournamentStatus,
};
