//! Integration tests for the scoring engine and final standings.

use mcmahon_pairing::{
    record_result, standings, GameResult, Participant, Player, PointScheme, RatingPolicy, TieBreak,
    TournamentConfig, TournamentError,
};

fn participant(name: &str, rating: i32, rounds: u32) -> Participant {
    Participant::new(&Player::new(name, rating), rounds)
}

#[test]
fn handicap_is_written_to_both_sides() {
    let mut c = TournamentConfig::new("Handicap", 3);
    c.handicap_bar = 8;
    c.handicap_max = 9;
    c.handicap_correction = -2;
    let mut weak = participant("Weak", 0, 3);
    let mut strong = participant("Strong", 20, 3);

    let sides = record_result(&mut strong, Some(&mut weak), 0, GameResult::Loss, &c).unwrap();

    assert_eq!(sides.len(), 2);
    assert_eq!(strong.rounds[0].handicap, -7);
    assert_eq!(weak.rounds[0].handicap, 7);
    assert_eq!(strong.rounds[0].opponent, Some(weak.id));
    assert_eq!(weak.rounds[0].result, GameResult::Win);
    assert_eq!(weak.score, 1.0);
    assert_eq!(strong.score, 0.0);
}

#[test]
fn duplicate_result_fails_and_changes_nothing() {
    let c = TournamentConfig::new("Duplicate", 3);
    let mut a = participant("A", 3, 3);
    let mut b = participant("B", 1, 3);
    record_result(&mut a, Some(&mut b), 1, GameResult::Win, &c).unwrap();
    let (a_before, b_before) = (a.clone(), b.clone());

    let err = record_result(&mut a, Some(&mut b), 1, GameResult::Draw, &c).unwrap_err();
    assert!(matches!(err, TournamentError::DuplicateResult { round: 1, .. }));
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn one_side_already_scored_blocks_both() {
    let c = TournamentConfig::new("Partial", 2);
    let mut a = participant("A", 0, 2);
    let mut b = participant("B", 0, 2);
    record_result(&mut b, None, 0, GameResult::Win, &c).unwrap();

    assert!(record_result(&mut a, Some(&mut b), 0, GameResult::Win, &c).is_err());
    assert!(!a.is_scored(0));
    assert_eq!(a.score, 0.0);
}

#[test]
fn custom_point_scheme_and_bye() {
    let mut c = TournamentConfig::new("Three points", 2);
    c.points = PointScheme {
        win: 3.0,
        draw: 1.0,
        loss: 0.0,
    };
    let mut a = participant("A", 0, 2);
    let mut b = participant("B", 0, 2);

    record_result(&mut a, Some(&mut b), 0, GameResult::Draw, &c).unwrap();
    assert_eq!((a.score, b.score), (1.0, 1.0));

    record_result(&mut a, None, 1, GameResult::Win, &c).unwrap();
    assert_eq!(a.score, 4.0);
    assert!(a.rounds[1].is_bye());
    assert_eq!(a.bye_count(), 1);
}

#[test]
fn rejects_unrecordable_outcomes_and_rounds() {
    let c = TournamentConfig::new("Bad input", 2);
    let mut a = participant("A", 0, 2);
    assert!(matches!(
        record_result(&mut a, None, 0, GameResult::NotPlayed, &c),
        Err(TournamentError::InvalidOutcome(GameResult::NotPlayed))
    ));
    assert!(matches!(
        record_result(&mut a, None, 2, GameResult::Win, &c),
        Err(TournamentError::InvalidRoundNumber { round: 2, .. })
    ));
}

#[test]
fn elo_policy_updates_ratings_after_a_game() {
    let mut c = TournamentConfig::new("Elo", 1);
    c.rating_policy = RatingPolicy::Elo {
        k_factor: 4.0,
        scale: 20.0,
    };
    let mut a = participant("A", 5, 1);
    let mut b = participant("B", 5, 1);

    let sides = record_result(&mut a, Some(&mut b), 0, GameResult::Win, &c).unwrap();
    assert_eq!((a.rating, b.rating), (7, 3));
    assert_eq!(sides[0].rating, 7);
    assert_eq!(sides[1].rating, 3);
}

/// A beats B, C beats D, C beats A, B beats D: A and B tie on one point.
fn tied_pair(chain: Vec<TieBreak>) -> (Vec<Participant>, TournamentConfig) {
    let mut c = TournamentConfig::new("Ties", 2);
    c.tie_breaks = chain;
    let mut a = participant("A", 1, 2);
    let mut b = participant("B", 9, 2);
    let mut cc = participant("C", 5, 2);
    let mut d = participant("D", 0, 2);
    record_result(&mut a, Some(&mut b), 0, GameResult::Win, &c).unwrap();
    record_result(&mut cc, Some(&mut d), 0, GameResult::Win, &c).unwrap();
    record_result(&mut cc, Some(&mut a), 1, GameResult::Win, &c).unwrap();
    record_result(&mut b, Some(&mut d), 1, GameResult::Win, &c).unwrap();
    (vec![d, cc, b, a], c)
}

#[test]
fn head_to_head_breaks_ties_before_rating() {
    let (ps, c) = tied_pair(vec![TieBreak::HeadToHead, TieBreak::Rating]);
    let table = standings(&ps, &c);
    let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["C", "A", "B", "D"]);
    assert_eq!(table[1].tie_break(TieBreak::HeadToHead), Some(1.0));
    assert_eq!(table[2].tie_break(TieBreak::HeadToHead), Some(0.0));
    assert_eq!(
        table.iter().map(|s| s.rank).collect::<Vec<_>>(),
        [1, 2, 3, 4]
    );
}

#[test]
fn rating_alone_reverses_the_tie() {
    let (ps, c) = tied_pair(vec![TieBreak::Rating]);
    let table = standings(&ps, &c);
    assert_eq!(table[1].name, "B");
    assert_eq!(table[2].name, "A");
}

#[test]
fn opponent_strength_tie_breaks() {
    let (ps, c) = tied_pair(vec![TieBreak::SonnebornBerger, TieBreak::Buchholz]);
    let table = standings(&ps, &c);
    let a = table.iter().find(|s| s.name == "A").unwrap();
    let b = table.iter().find(|s| s.name == "B").unwrap();
    // A: beat B (1 pt), lost to C (2 pts). B: lost to A (1 pt), beat D (0 pts).
    assert_eq!(a.tie_break(TieBreak::SonnebornBerger), Some(1.0));
    assert_eq!(a.tie_break(TieBreak::Buchholz), Some(3.0));
    assert_eq!(b.tie_break(TieBreak::SonnebornBerger), Some(0.0));
    assert_eq!(b.tie_break(TieBreak::Buchholz), Some(1.0));
    assert!(a.rank < b.rank);
}
