//! Play a whole tournament with random results and print the final standings as CSV.
//! Run with: cargo run --bin simulate -- tournament.json
//! The JSON file holds `config` (a TournamentConfig) and `players` (name + rating).
//! Override with env: SEED (u64, default 42), DRAW_RATE (0.0..1.0, default 0.05), RUST_LOG.

use mcmahon_pairing::logic::expected_score;
use mcmahon_pairing::{
    final_standings, pair_next_round, submit_result, GameResult, ParticipantId, Player, Tournament,
    TournamentConfig, TournamentStatus,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::error::Error;

/// Rating gap giving 10:1 odds in the simulated results.
const SIMULATION_SCALE: f64 = 10.0;

#[derive(Deserialize)]
struct SimulationFile {
    config: TournamentConfig,
    players: Vec<PlayerEntry>,
}

#[derive(Deserialize)]
struct PlayerEntry {
    name: String,
    rating: i32,
}

fn default_seed() -> u64 {
    42
}

fn default_draw_rate() -> f64 {
    0.05
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: simulate <tournament.json>")?;
    let seed: u64 = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default_seed);
    let draw_rate: f64 = std::env::var("DRAW_RATE")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|r: &f64| (0.0..=1.0).contains(r))
        .unwrap_or_else(default_draw_rate);

    let file: SimulationFile = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let mut tournament = Tournament::new(file.config)?;
    for entry in &file.players {
        tournament.add_participant(&Player::new(entry.name.clone(), entry.rating))?;
    }
    log::info!(
        "Simulating '{}' with {} players, seed {}",
        tournament.config.name,
        tournament.participants.len(),
        seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    while tournament.status != TournamentStatus::Completed {
        let pairing = pair_next_round(&mut tournament)?;
        for diagnostic in &pairing.diagnostics {
            log::warn!("Round {}: {:?}", pairing.round_number, diagnostic);
        }
        for &(first, second) in &pairing.pairs {
            let outcome = simulate_game(&tournament, first, second, draw_rate, &mut rng);
            submit_result(&mut tournament, pairing.round_number, first, outcome)?;
        }
    }

    let mut out = csv::Writer::from_writer(std::io::stdout());
    let mut header = vec!["rank".to_string(), "name".to_string(), "score".to_string()];
    header.extend(tournament.config.tie_breaks.iter().map(|t| format!("{t:?}")));
    out.write_record(&header)?;
    for row in final_standings(&tournament)? {
        let mut record = vec![row.rank.to_string(), row.name.clone(), row.score.to_string()];
        record.extend(row.tie_breaks.iter().map(|(_, v)| v.to_string()));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

/// Random outcome from `first`'s side, weighted by the rating gap.
fn simulate_game(
    tournament: &Tournament,
    first: ParticipantId,
    second: ParticipantId,
    draw_rate: f64,
    rng: &mut StdRng,
) -> GameResult {
    let rating = |id| tournament.participant(id).map(|p| p.rating).unwrap_or(0);
    if rng.gen_bool(draw_rate) {
        return GameResult::Draw;
    }
    let p_first = expected_score(rating(first), rating(second), SIMULATION_SCALE);
    if rng.gen_bool(p_first.clamp(0.0, 1.0)) {
        GameResult::Win
    } else {
        GameResult::Loss
    }
}
