//! Rating model: effective rating, handicap rule, and per-game rating updates.

use crate::models::{GameResult, Participant, RatingPolicy, TournamentConfig};

/// Rating used for pairing and handicap decisions.
pub fn effective_rating(participant: &Participant) -> i32 {
    participant.rating
}

/// Handicap received by the side rated `rating_a` when it meets `rating_b`.
///
/// Zero when the gap is within `handicap_bar`. Otherwise the excess over the bar,
/// capped at `handicap_max`, plus `handicap_correction` (never below zero). Positive
/// when `a` is the lower-rated side, so `handicap(a, b) == -handicap(b, a)`.
/// Equal ratings never get a handicap, whatever the bar.
pub fn handicap(rating_a: i32, rating_b: i32, config: &TournamentConfig) -> i32 {
    let gap = i64::from(rating_a) - i64::from(rating_b);
    if gap == 0 || gap.abs() <= i64::from(config.handicap_bar) {
        return 0;
    }
    let excess = (gap.abs() - i64::from(config.handicap_bar)).min(i64::from(config.handicap_max));
    let magnitude = (excess + i64::from(config.handicap_correction)).max(0) as i32;
    if gap < 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Ratings of both sides after a game, `result` read from `a`'s side.
pub fn updated_ratings(rating_a: i32, rating_b: i32, result: GameResult, policy: &RatingPolicy) -> (i32, i32) {
    let (k_factor, scale) = match *policy {
        RatingPolicy::Fixed => return (rating_a, rating_b),
        RatingPolicy::Elo { k_factor, scale } => (k_factor, scale),
    };
    let actual = match result {
        GameResult::Win => 1.0,
        GameResult::Draw => 0.5,
        GameResult::Loss => 0.0,
        GameResult::NotPlayed | GameResult::Absent => return (rating_a, rating_b),
    };
    let expected = expected_score(rating_a, rating_b, scale);
    let delta = (k_factor * (actual - expected)).round() as i32;
    (rating_a.saturating_add(delta), rating_b.saturating_sub(delta))
}

/// Expected score of `a` against `b` on a logistic curve.
pub fn expected_score(rating_a: i32, rating_b: i32, scale: f64) -> f64 {
    let diff = (i64::from(rating_b) - i64::from(rating_a)) as f64;
    1.0 / (1.0 + 10.0_f64.powf(diff / scale))
}
