//! Scoring engine: fold one result into the participants' scoring slots.

use crate::logic::rating::{effective_rating, handicap, updated_ratings};
use crate::models::{
    GameResult, Participant, ParticipantId, ScoredSide, Scoring, TournamentConfig, TournamentError,
};

/// Record `outcome` (from `a`'s side) for `round_number`.
///
/// With an opponent both slots are written, the handicap is applied, and ratings move
/// per the rating policy. Without one the result is a bye for `a`. Any slot already
/// scored fails the whole call with `DuplicateResult` and nothing is written.
pub fn record_result(
    a: &mut Participant,
    b: Option<&mut Participant>,
    round_number: u32,
    outcome: GameResult,
    config: &TournamentConfig,
) -> Result<Vec<ScoredSide>, TournamentError> {
    config.check_round(round_number)?;
    if !matches!(outcome, GameResult::Win | GameResult::Loss | GameResult::Draw) {
        return Err(TournamentError::InvalidOutcome(outcome));
    }
    ensure_unscored(a, round_number, config)?;
    if let Some(b) = b.as_deref() {
        ensure_unscored(b, round_number, config)?;
    }

    let Some(b) = b else {
        write_slot(a, round_number, None, outcome, 0, config);
        log::debug!("Round {}: {} scored bye as {:?}", round_number, a.id, outcome);
        return Ok(vec![side(a, round_number)]);
    };

    let given = handicap(effective_rating(a), effective_rating(b), config);
    write_slot(a, round_number, Some(b.id), outcome, given, config);
    write_slot(b, round_number, Some(a.id), outcome.inverse(), -given, config);

    let (rating_a, rating_b) = updated_ratings(a.rating, b.rating, outcome, &config.rating_policy);
    a.rating = rating_a;
    b.rating = rating_b;

    log::debug!(
        "Round {}: {} {:?} against {} (handicap {})",
        round_number,
        a.id,
        outcome,
        b.id,
        given
    );
    Ok(vec![side(a, round_number), side(b, round_number)])
}

fn ensure_unscored(
    p: &Participant,
    round_number: u32,
    config: &TournamentConfig,
) -> Result<(), TournamentError> {
    let slot = p
        .scoring(round_number)
        .ok_or(TournamentError::InvalidRoundNumber {
            round: round_number,
            number_of_rounds: config.number_of_rounds,
        })?;
    if slot.result.is_recorded() {
        return Err(TournamentError::DuplicateResult {
            participant: p.id,
            round: round_number,
        });
    }
    Ok(())
}

/// Callers check the slot first.
fn write_slot(
    p: &mut Participant,
    round_number: u32,
    opponent: Option<ParticipantId>,
    result: GameResult,
    received: i32,
    config: &TournamentConfig,
) {
    if let Some(slot) = p.scoring_mut(round_number) {
        slot.opponent = opponent;
        slot.result = result;
        slot.handicap = received;
        p.score += config.points.points_for(result);
    }
}

fn side(p: &Participant, round_number: u32) -> ScoredSide {
    ScoredSide {
        participant_id: p.id,
        scoring: p
            .scoring(round_number)
            .cloned()
            .unwrap_or_else(|| Scoring::empty(round_number)),
        score: p.score,
        rating: p.rating,
    }
}
