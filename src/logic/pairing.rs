//! Pairing engine: rank-ordered pairing with rematch avoidance.
//!
//! 1. Rank by score (desc), rating (desc), id (asc).
//! 2. For odd fields pick the bye first: lowest-ranked among those with the fewest byes
//!    (or simply lowest-ranked without rotation).
//! 3. Walk the ranking, giving each unpaired participant the best-quality legal opponent
//!    below it, backtracking when the rest of the field cannot be completed.
//! 4. If no legal matching exists within the search budget, pair greedily while
//!    minimizing constraint violations and report what was relaxed.

use crate::logic::constraints::{exceeds_bar, is_legal_pair, pair_quality, rating_gap};
use crate::logic::rating::effective_rating;
use crate::models::{
    Participant, PairingDiagnostic, RoundPairing, TournamentConfig, TournamentError,
};

/// Search nodes visited before giving up on a fully legal matching.
pub const DEFAULT_SEARCH_BUDGET: usize = 100_000;

/// Sort participants into pairing order. Total: ties end on id.
pub fn rank_for_pairing(participants: &[Participant]) -> Vec<&Participant> {
    let mut ranked: Vec<&Participant> = participants.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| effective_rating(b).cmp(&effective_rating(a)))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

/// Pair one round. Pure: the same snapshot always yields the same pairing.
pub fn pair_round(
    participants: &[Participant],
    round_number: u32,
    config: &TournamentConfig,
) -> Result<RoundPairing, TournamentError> {
    pair_round_with_budget(participants, round_number, config, DEFAULT_SEARCH_BUDGET)
}

/// As [`pair_round`], with an explicit bound on backtracking.
pub fn pair_round_with_budget(
    participants: &[Participant],
    round_number: u32,
    config: &TournamentConfig,
    budget: usize,
) -> Result<RoundPairing, TournamentError> {
    config.check_round(round_number)?;
    if participants.is_empty() {
        return Err(TournamentError::EmptyField("participants"));
    }

    let ranked = rank_for_pairing(participants);
    let mut budget = budget;
    let bye_order = bye_candidates(&ranked, config);

    let attempts: Vec<Option<usize>> = if bye_order.is_empty() {
        vec![None]
    } else {
        bye_order.iter().copied().map(Some).collect()
    };

    for bye in &attempts {
        let pool: Vec<usize> = (0..ranked.len()).filter(|&i| Some(i) != *bye).collect();
        let mut search = Search::new(&ranked, &pool, config, budget);
        let found = search.run();
        budget = search.budget;
        if found {
            let pairs = search
                .pairs
                .iter()
                .map(|&(a, b)| (ranked[pool[a]].id, ranked[pool[b]].id))
                .collect();
            let pairing = RoundPairing {
                round_number,
                pairs,
                bye: bye.map(|i| ranked[i].id),
                diagnostics: Vec::new(),
            };
            log_pairing(&pairing);
            return Ok(pairing);
        }
        if budget == 0 {
            break;
        }
    }

    let bye = attempts.first().copied().flatten();
    let pool: Vec<usize> = (0..ranked.len()).filter(|&i| Some(i) != bye).collect();
    let pairing = relaxed_pairing(&ranked, &pool, bye, round_number, config);
    log::warn!(
        "Round {}: no legal pairing found, relaxed {} constraint(s)",
        round_number,
        pairing.diagnostics.len().saturating_sub(1)
    );
    log_pairing(&pairing);
    Ok(pairing)
}

/// Bye candidates in preference order (indices into `ranked`). Empty for even fields.
fn bye_candidates(ranked: &[&Participant], config: &TournamentConfig) -> Vec<usize> {
    if ranked.len() % 2 == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..ranked.len()).rev().collect();
    if config.bye_rotation {
        // stable: keeps lowest-ranked first within each bye count
        order.sort_by_key(|&i| ranked[i].bye_count());
    }
    order
}

/// Depth-first matching over `pool` (positions into the ranking).
struct Search<'a> {
    ranked: &'a [&'a Participant],
    pool: &'a [usize],
    config: &'a TournamentConfig,
    used: Vec<bool>,
    /// Pairs of pool positions, higher-ranked first.
    pairs: Vec<(usize, usize)>,
    budget: usize,
}

impl<'a> Search<'a> {
    fn new(
        ranked: &'a [&'a Participant],
        pool: &'a [usize],
        config: &'a TournamentConfig,
        budget: usize,
    ) -> Self {
        Self {
            ranked,
            pool,
            config,
            used: vec![false; pool.len()],
            pairs: Vec::with_capacity(pool.len() / 2),
            budget,
        }
    }

    fn participant(&self, pos: usize) -> &'a Participant {
        self.ranked[self.pool[pos]]
    }

    fn run(&mut self) -> bool {
        let Some(first) = self.used.iter().position(|u| !u) else {
            return true;
        };
        if self.budget == 0 {
            return false;
        }
        self.budget -= 1;

        self.used[first] = true;
        for second in self.candidates(first) {
            self.used[second] = true;
            self.pairs.push((first, second));
            if self.run() {
                return true;
            }
            self.pairs.pop();
            self.used[second] = false;
            if self.budget == 0 {
                break;
            }
        }
        self.used[first] = false;
        false
    }

    /// Legal opponents for `first`, best quality first, nearer in rank on ties.
    fn candidates(&self, first: usize) -> Vec<usize> {
        let a = self.participant(first);
        let mut scored: Vec<(i64, usize)> = (first + 1..self.pool.len())
            .filter(|&j| !self.used[j])
            .filter(|&j| is_legal_pair(a, self.participant(j), self.config))
            .map(|j| (pair_quality(a, self.participant(j), self.config), j))
            .collect();
        scored.sort_unstable();
        scored.into_iter().map(|(_, j)| j).collect()
    }
}

/// Greedy pairing that allows rematches and bar breaches, fewest violations first.
fn relaxed_pairing(
    ranked: &[&Participant],
    pool: &[usize],
    bye: Option<usize>,
    round_number: u32,
    config: &TournamentConfig,
) -> RoundPairing {
    let mut used = vec![false; pool.len()];
    let mut pairs = Vec::with_capacity(pool.len() / 2);
    let mut diagnostics = vec![PairingDiagnostic::NoLegalPairing];

    for first in 0..pool.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let a = ranked[pool[first]];
        let best = (first + 1..pool.len())
            .filter(|&j| !used[j])
            .map(|j| {
                let b = ranked[pool[j]];
                let repeat = a.has_played(b.id) || b.has_played(a.id);
                let over_bar = config.mm_bar_hard && exceeds_bar(a, b, config);
                let violations = u8::from(repeat) + u8::from(over_bar);
                ((violations, pair_quality(a, b, config), j), repeat, over_bar)
            })
            .min_by_key(|(key, _, _)| *key);

        let Some(((_, _, second), repeat, over_bar)) = best else {
            continue;
        };
        used[second] = true;
        let b = ranked[pool[second]];
        if repeat {
            diagnostics.push(PairingDiagnostic::RepeatPairForced {
                first: a.id,
                second: b.id,
            });
        }
        if over_bar {
            diagnostics.push(PairingDiagnostic::RatingBarExceeded {
                first: a.id,
                second: b.id,
                gap: i32::try_from(rating_gap(a, b)).unwrap_or(i32::MAX),
            });
        }
        pairs.push((a.id, b.id));
    }

    RoundPairing {
        round_number,
        pairs,
        bye: bye.map(|i| ranked[i].id),
        diagnostics,
    }
}

fn log_pairing(pairing: &RoundPairing) {
    for (a, b) in &pairing.pairs {
        log::debug!("Round {}: {} vs {}", pairing.round_number, a, b);
    }
    if let Some(bye) = pairing.bye {
        log::debug!("Round {}: bye for {}", pairing.round_number, bye);
    }
}
