//! Tournament orchestration: pair the next round, take results, complete.

use crate::logic::pairing::pair_round;
use crate::logic::rating::{effective_rating, handicap};
use crate::logic::scoring::record_result;
use crate::logic::standings::standings;
use crate::models::{
    Game, GameResult, Participant, ParticipantId, ResultReport, RoundPairing, Standing, Tournament,
    TournamentError, TournamentStatus,
};

/// Pair the next round. The previous round must be fully scored.
///
/// The first call moves the tournament to InProgress. A bye is scored at once with the
/// configured bye result. Participants whose slot for the round is already filled
/// (imported or absent) sit the round out; when that is everyone, the round is
/// recorded with no games.
pub fn pair_next_round(tournament: &mut Tournament) -> Result<RoundPairing, TournamentError> {
    tournament.ensure_open()?;
    let round = tournament.current_round();
    tournament.config.check_round(round)?;
    if tournament.participants.is_empty() {
        return Err(TournamentError::EmptyField("participants"));
    }
    if round > 0 && !tournament.is_round_scored(round - 1) {
        return Err(TournamentError::RoundIncomplete(round - 1));
    }

    let field: Vec<Participant> = tournament
        .participants
        .iter()
        .filter(|p| !p.is_scored(round))
        .cloned()
        .collect();
    let pairing = if field.is_empty() {
        log::info!("Tournament {}: round {} needs no games", tournament.id, round);
        RoundPairing {
            round_number: round,
            ..RoundPairing::default()
        }
    } else {
        pair_round(&field, round, &tournament.config)?
    };

    if let Some(bye) = pairing.bye {
        let config = &tournament.config;
        let p = tournament
            .participants
            .iter_mut()
            .find(|p| p.id == bye)
            .ok_or(TournamentError::ParticipantNotFound(bye))?;
        record_result(p, None, round, config.bye_result, config)?;
    }

    for &(first, second) in &pairing.pairs {
        let (Some(a), Some(b)) = (tournament.participant(first), tournament.participant(second)) else {
            continue;
        };
        let game = Game {
            round_number: round,
            first,
            second,
            handicap: handicap(effective_rating(a), effective_rating(b), &tournament.config),
            result: GameResult::NotPlayed,
        };
        tournament.games.push(game);
    }
    tournament.pairings.push(pairing.clone());

    if tournament.status == TournamentStatus::Created {
        tournament.status = TournamentStatus::InProgress;
        log::info!("Tournament {} started", tournament.id);
    }
    log::info!(
        "Tournament {}: paired round {} ({} games{})",
        tournament.id,
        round,
        pairing.pairs.len(),
        if pairing.bye.is_some() { ", 1 bye" } else { "" }
    );
    complete_if_done(tournament);
    Ok(pairing)
}

/// Record the outcome of `participant`'s game in `round`, read from that participant's side.
pub fn submit_result(
    tournament: &mut Tournament,
    round: u32,
    participant: ParticipantId,
    outcome: GameResult,
) -> Result<ResultReport, TournamentError> {
    tournament.ensure_open()?;
    tournament.config.check_round(round)?;
    if tournament.participant(participant).is_none() {
        return Err(TournamentError::ParticipantNotFound(participant));
    }
    let game_idx = tournament
        .games
        .iter()
        .position(|g| g.round_number == round && g.involves(participant))
        .ok_or(TournamentError::NotPaired { participant, round })?;

    let game = &tournament.games[game_idx];
    let (first, second) = (game.first, game.second);
    let first_outcome = if first == participant { outcome } else { outcome.inverse() };

    let i = index_of(tournament, first)?;
    let j = index_of(tournament, second)?;
    let (a, b) = pair_mut(&mut tournament.participants, i, j);
    let sides = record_result(a, Some(b), round, first_outcome, &tournament.config)?;
    tournament.games[game_idx].result = first_outcome;

    complete_if_done(tournament);
    Ok(ResultReport {
        round_number: round,
        sides,
        status: tournament.status,
    })
}

/// Provisional ranking at any point of the tournament.
pub fn current_standings(tournament: &Tournament) -> Vec<Standing> {
    standings(&tournament.participants, &tournament.config)
}

/// Frozen final ranking; fails until the last round is fully scored.
pub fn final_standings(tournament: &Tournament) -> Result<&[Standing], TournamentError> {
    match &tournament.final_standings {
        Some(s) if tournament.status == TournamentStatus::Completed => Ok(s.as_slice()),
        _ => {
            let pending = (0..tournament.config.number_of_rounds)
                .find(|&r| !tournament.is_round_scored(r))
                .unwrap_or(0);
            Err(TournamentError::RoundIncomplete(pending))
        }
    }
}

/// Move to Completed once the last round is paired and fully scored.
fn complete_if_done(tournament: &mut Tournament) {
    let rounds = tournament.config.number_of_rounds;
    if tournament.current_round() < rounds || !tournament.is_round_scored(rounds - 1) {
        return;
    }
    tournament.final_standings = Some(standings(&tournament.participants, &tournament.config));
    tournament.status = TournamentStatus::Completed;
    log::info!("Tournament {} completed after {} rounds", tournament.id, rounds);
}

fn index_of(tournament: &Tournament, id: ParticipantId) -> Result<usize, TournamentError> {
    tournament
        .participants
        .iter()
        .position(|p| p.id == id)
        .ok_or(TournamentError::ParticipantNotFound(id))
}

/// Two distinct mutable elements of one slice.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
