//! Tournament configuration and the policy enums it selects between.
//!
//! Deserialized from caller input and checked with `validator` before a
//! [`Tournament`](crate::models::Tournament) accepts it.

use crate::models::participant::GameResult;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

/// Points awarded per result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_point_order"))]
pub struct PointScheme {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl Default for PointScheme {
    fn default() -> Self {
        Self {
            win: 1.0,
            draw: 0.5,
            loss: 0.0,
        }
    }
}

impl PointScheme {
    /// Smallest non-zero difference between two results' points; 1 when all are equal.
    pub fn step(&self) -> f64 {
        let step = [self.win - self.draw, self.draw - self.loss, self.win - self.loss]
            .into_iter()
            .filter(|d| *d > 0.0)
            .fold(f64::INFINITY, f64::min);
        if step.is_finite() {
            step
        } else {
            1.0
        }
    }

    pub fn points_for(&self, result: GameResult) -> f64 {
        match result {
            GameResult::Win => self.win,
            GameResult::Draw => self.draw,
            GameResult::Loss => self.loss,
            GameResult::NotPlayed | GameResult::Absent => 0.0,
        }
    }
}

/// Secondary ranking criteria, applied in configured order after total score.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Points scored against participants on the same total.
    HeadToHead,
    /// Sum of beaten opponents' scores plus half of drawn opponents' scores.
    SonnebornBerger,
    /// Sum of all opponents' scores.
    Buchholz,
    Wins,
    Rating,
}

/// How effective ratings move as results come in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatingPolicy {
    /// Ratings stay at the player's base rating for the whole tournament.
    #[default]
    Fixed,
    /// Logistic expected score; `scale` is the rating gap giving 10:1 odds.
    Elo { k_factor: f64, scale: f64 },
}

/// Static configuration of a tournament. Frozen once the first round is paired.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct TournamentConfig {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "A tournament needs at least one round"))]
    pub number_of_rounds: u32,
    pub mm_floor: i32,
    #[validate(range(min = 0))]
    pub mm_bar: i32,
    /// When false, gaps above `mm_bar` are allowed but penalized.
    #[serde(default = "default_true")]
    pub mm_bar_hard: bool,
    pub mm_dense: bool,
    pub handicap_bar: i32,
    #[validate(range(min = 0))]
    pub handicap_max: i32,
    pub handicap_correction: i32,
    #[serde(default)]
    #[validate(nested)]
    pub points: PointScheme,
    #[serde(default = "default_bye_result")]
    #[validate(custom(function = "validate_bye_result"))]
    pub bye_result: GameResult,
    /// Give the bye to someone who has not had one yet, when possible.
    #[serde(default = "default_true")]
    pub bye_rotation: bool,
    #[serde(default)]
    pub allow_late_entry: bool,
    #[serde(default = "default_tie_breaks")]
    #[validate(custom(function = "validate_tie_breaks"))]
    pub tie_breaks: Vec<TieBreak>,
    #[serde(default)]
    #[validate(custom(function = "validate_rating_policy"))]
    pub rating_policy: RatingPolicy,
}

impl TournamentConfig {
    /// Config with the given name and round count: soft McMahon bar at zero, no handicap.
    pub fn new(name: impl Into<String>, number_of_rounds: u32) -> Self {
        Self {
            name: name.into(),
            number_of_rounds,
            mm_floor: 0,
            mm_bar: 0,
            mm_bar_hard: false,
            mm_dense: true,
            handicap_bar: 0,
            handicap_max: 0,
            handicap_correction: 0,
            points: PointScheme::default(),
            bye_result: default_bye_result(),
            bye_rotation: true,
            allow_late_entry: false,
            tie_breaks: default_tie_breaks(),
            rating_policy: RatingPolicy::Fixed,
        }
    }

    /// Run field validation, mapping failures into the crate error.
    pub fn check(&self) -> Result<(), TournamentError> {
        self.validate().map_err(TournamentError::InvalidConfig)
    }

    /// Fail with `InvalidRoundNumber` unless `round` is in `[0, number_of_rounds)`.
    pub fn check_round(&self, round: u32) -> Result<(), TournamentError> {
        if round >= self.number_of_rounds {
            return Err(TournamentError::InvalidRoundNumber {
                round,
                number_of_rounds: self.number_of_rounds,
            });
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_bye_result() -> GameResult {
    GameResult::Win
}

fn default_tie_breaks() -> Vec<TieBreak> {
    vec![TieBreak::HeadToHead, TieBreak::SonnebornBerger, TieBreak::Rating]
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_point_order(points: &PointScheme) -> Result<(), ValidationError> {
    let all_finite = [points.win, points.draw, points.loss]
        .iter()
        .all(|p| p.is_finite());
    if !all_finite {
        return Err(invalid("points_not_finite", "Points must be finite numbers"));
    }
    if points.win < points.draw || points.draw < points.loss {
        return Err(invalid("points_order", "Points must satisfy win >= draw >= loss"));
    }
    Ok(())
}

fn validate_bye_result(result: &GameResult) -> Result<(), ValidationError> {
    match result {
        GameResult::Win | GameResult::Draw | GameResult::Loss => Ok(()),
        _ => Err(invalid("bye_result", "Bye must score as win, draw or loss")),
    }
}

#[allow(clippy::ptr_arg)]
fn validate_tie_breaks(chain: &Vec<TieBreak>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if chain.iter().all(|t| seen.insert(*t)) {
        Ok(())
    } else {
        Err(invalid("tie_breaks_duplicate", "Tie-break chain lists a criterion twice"))
    }
}

fn validate_rating_policy(policy: &RatingPolicy) -> Result<(), ValidationError> {
    match *policy {
        RatingPolicy::Fixed => Ok(()),
        RatingPolicy::Elo { k_factor, scale } if k_factor > 0.0 && scale > 0.0 => Ok(()),
        RatingPolicy::Elo { .. } => Err(invalid("rating_policy", "Elo k_factor and scale must be positive")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TournamentConfig {
        TournamentConfig::new("Autumn Open", 5)
    }

    #[test]
    fn default_config_is_valid() {
        assert!(base().check().is_ok());
    }

    #[test]
    fn rejects_zero_rounds_and_empty_name() {
        let mut c = base();
        c.number_of_rounds = 0;
        assert!(matches!(c.check(), Err(TournamentError::InvalidConfig(_))));

        let mut c = base();
        c.name = String::new();
        assert!(matches!(c.check(), Err(TournamentError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_duplicate_tie_breaks() {
        let mut c = base();
        c.tie_breaks = vec![TieBreak::Buchholz, TieBreak::Buchholz];
        assert!(c.check().is_err());
    }

    #[test]
    fn rejects_unordered_points_and_bad_bye() {
        let mut c = base();
        c.points = PointScheme { win: 0.5, draw: 1.0, loss: 0.0 };
        assert!(c.check().is_err());

        let mut c = base();
        c.bye_result = GameResult::Absent;
        assert!(c.check().is_err());
    }

    #[test]
    fn point_step_is_smallest_result_difference() {
        assert_eq!(PointScheme::default().step(), 0.5);
        assert_eq!(PointScheme { win: 3.0, draw: 1.0, loss: 0.0 }.step(), 1.0);
        assert_eq!(PointScheme { win: 1.0, draw: 1.0, loss: 1.0 }.step(), 1.0);
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "name": "Championship of Ukraine 2021 - quarterfinals",
            "number_of_rounds": 5,
            "mm_floor": -20,
            "mm_bar": 8,
            "mm_dense": true,
            "handicap_bar": -30,
            "handicap_max": 9,
            "handicap_correction": -2
        }"#;
        let c: TournamentConfig = serde_json::from_str(json).unwrap();
        assert!(c.mm_bar_hard);
        assert_eq!(c.points, PointScheme::default());
        assert_eq!(c.bye_result, GameResult::Win);
        assert_eq!(c.tie_breaks, default_tie_breaks());
        assert_eq!(c.rating_policy, RatingPolicy::Fixed);
        assert!(c.check().is_ok());
    }

    #[test]
    fn check_round_bounds() {
        let c = base();
        assert!(c.check_round(4).is_ok());
        assert!(matches!(
            c.check_round(5),
            Err(TournamentError::InvalidRoundNumber { round: 5, number_of_rounds: 5 })
        ));
    }
}
