//! Pairing and scoring engine: rating model, constraints, pairing, scoring, standings, lifecycle.

mod constraints;
mod lifecycle;
mod pairing;
mod rating;
mod scoring;
mod standings;

pub use constraints::{
    exceeds_bar, is_legal_pair, pair_quality, rating_gap, BAR_PENALTY, SCORE_GAP_WEIGHT,
};
pub use lifecycle::{current_standings, final_standings, pair_next_round, submit_result};
pub use pairing::{pair_round, pair_round_with_budget, rank_for_pairing, DEFAULT_SEARCH_BUDGET};
pub use rating::{effective_rating, expected_score, handicap, updated_ratings};
pub use scoring::record_result;
pub use standings::{standings, tie_break_value};
