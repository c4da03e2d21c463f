//! Standings: rank by score, then the configured tie-break chain, then id.

use crate::logic::rating::effective_rating;
use crate::models::{Participant, ParticipantId, Standing, TieBreak, TournamentConfig};
use std::cmp::Ordering;
use std::collections::HashMap;

const SCORE_EPSILON: f64 = 1e-9;

/// Rank all participants. The order is total: equal chains fall back to id.
pub fn standings(participants: &[Participant], config: &TournamentConfig) -> Vec<Standing> {
    let scores: HashMap<ParticipantId, f64> = participants.iter().map(|p| (p.id, p.score)).collect();

    let mut rows: Vec<(&Participant, Vec<(TieBreak, f64)>)> = participants
        .iter()
        .map(|p| {
            let values = config
                .tie_breaks
                .iter()
                .map(|&kind| (kind, tie_break_value(p, kind, &scores, config)))
                .collect();
            (p, values)
        })
        .collect();

    rows.sort_by(|(a, av), (b, bv)| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| compare_chain(av, bv))
            .then_with(|| a.id.cmp(&b.id))
    });

    rows.into_iter()
        .enumerate()
        .map(|(i, (p, tie_breaks))| Standing {
            participant_id: p.id,
            name: p.name.clone(),
            rank: i + 1,
            score: p.score,
            tie_breaks,
        })
        .collect()
}

/// Higher tie-break values rank first.
fn compare_chain(a: &[(TieBreak, f64)], b: &[(TieBreak, f64)]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|((_, x), (_, y))| y.total_cmp(x))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

pub fn tie_break_value(
    p: &Participant,
    kind: TieBreak,
    scores: &HashMap<ParticipantId, f64>,
    config: &TournamentConfig,
) -> f64 {
    let games = p
        .rounds
        .iter()
        .filter_map(|s| s.opponent.map(|o| (o, s.result)));
    match kind {
        TieBreak::HeadToHead => games
            .filter(|(o, _)| {
                scores
                    .get(o)
                    .is_some_and(|s| (s - p.score).abs() < SCORE_EPSILON)
            })
            .map(|(_, r)| config.points.points_for(r))
            .sum(),
        TieBreak::Buchholz => games.filter_map(|(o, _)| scores.get(&o)).sum(),
        TieBreak::SonnebornBerger => {
            if config.points.win <= 0.0 {
                return 0.0;
            }
            games
                .filter_map(|(o, r)| {
                    scores
                        .get(&o)
                        .map(|s| s * config.points.points_for(r) / config.points.win)
                })
                .sum()
        }
        TieBreak::Wins => p.wins() as f64,
        TieBreak::Rating => f64::from(effective_rating(p)),
    }
}
