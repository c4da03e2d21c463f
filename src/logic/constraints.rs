//! Constraint evaluator: legality and quality of a candidate pair.

use crate::logic::rating::effective_rating;
use crate::models::{Participant, TournamentConfig};

/// Cost of one point-scheme step of score difference; dominates any rating term.
pub const SCORE_GAP_WEIGHT: i64 = 1_000;

/// Cost per rating point above a soft `mm_bar`.
pub const BAR_PENALTY: i64 = 100;

/// Absolute difference of effective ratings.
pub fn rating_gap(a: &Participant, b: &Participant) -> i64 {
    (i64::from(effective_rating(a)) - i64::from(effective_rating(b))).abs()
}

/// Whether the pair's rating gap is above `mm_bar`.
pub fn exceeds_bar(a: &Participant, b: &Participant, config: &TournamentConfig) -> bool {
    rating_gap(a, b) > i64::from(config.mm_bar)
}

/// Hard constraints: never the same participant twice, never a rematch,
/// and no gap above `mm_bar` when the bar is hard.
pub fn is_legal_pair(a: &Participant, b: &Participant, config: &TournamentConfig) -> bool {
    if a.id == b.id || a.has_played(b.id) || b.has_played(a.id) {
        return false;
    }
    !(config.mm_bar_hard && exceeds_bar(a, b, config))
}

/// Cost of pairing `a` with `b`; lower is better.
///
/// Score distance comes first, counted in steps of the point scheme. The rating term is the plain gap when `mm_dense`,
/// otherwise only the part of the gap beyond `|mm_floor|` counts. A soft bar adds
/// a penalty for every point above `mm_bar`.
pub fn pair_quality(a: &Participant, b: &Participant, config: &TournamentConfig) -> i64 {
    let score_gap = ((a.score - b.score).abs() / config.points.step()).round() as i64;
    let gap = rating_gap(a, b);
    let rating_term = if config.mm_dense {
        gap
    } else {
        (gap - i64::from(config.mm_floor.unsigned_abs())).max(0)
    };
    let bar_excess = (gap - i64::from(config.mm_bar)).max(0);
    let penalty = if config.mm_bar_hard { 0 } else { bar_excess * BAR_PENALTY };
    score_gap * SCORE_GAP_WEIGHT + rating_term + penalty
}
