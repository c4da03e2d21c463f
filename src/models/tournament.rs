//! Tournament, TournamentStatus, and TournamentError.

use crate::models::config::TournamentConfig;
use crate::models::game::{Game, RoundPairing};
use crate::models::participant::{GameResult, Participant, ParticipantId, Scoring};
use crate::models::player::{Player, PlayerId};
use crate::models::standing::Standing;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Errors that can occur during tournament operations. None of them leave partial state behind.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Round {round} is outside 0..{number_of_rounds}")]
    InvalidRoundNumber { round: u32, number_of_rounds: u32 },
    /// A required collection was empty.
    #[error("No {0} given")]
    EmptyField(&'static str),
    #[error("Participant {participant} already has a result for round {round}")]
    DuplicateResult {
        participant: ParticipantId,
        round: u32,
    },
    #[error("Tournament is completed; no further pairing or scoring")]
    TournamentClosed,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationErrors),
    /// Configuration or roster change after the first round was paired.
    #[error("Tournament has started; configuration and roster are frozen")]
    ConfigurationFrozen,
    #[error("Tournament does not accept late entries")]
    LateEntryNotAllowed,
    #[error("Player {0} is already entered in this tournament")]
    DuplicateParticipant(PlayerId),
    #[error("Participant {0} not found")]
    ParticipantNotFound(ParticipantId),
    #[error("Participant {participant} has no game in round {round}")]
    NotPaired {
        participant: ParticipantId,
        round: u32,
    },
    #[error("Round {0} is not fully scored yet")]
    RoundIncomplete(u32),
    /// Outcome that cannot be recorded for a game (not played, absent).
    #[error("Outcome {0:?} cannot be recorded here")]
    InvalidOutcome(GameResult),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle: Created -> InProgress -> Completed, never backwards.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Roster and configuration are editable.
    #[default]
    Created,
    /// Entered on the first pairing; configuration frozen.
    InProgress,
    /// Last round fully scored; final standings frozen.
    Completed,
}

/// Full tournament snapshot: configuration, roster, and round history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    pub status: TournamentStatus,
    pub participants: Vec<Participant>,
    /// One entry per paired round, indexed by round number.
    pub pairings: Vec<RoundPairing>,
    pub games: Vec<Game>,
    /// Set once on completion.
    pub final_standings: Option<Vec<Standing>>,
}

impl Tournament {
    /// Create a tournament in Created state. The configuration is validated first.
    pub fn new(config: TournamentConfig) -> Result<Self, TournamentError> {
        config.check()?;
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            status: TournamentStatus::Created,
            participants: Vec::new(),
            pairings: Vec::new(),
            games: Vec::new(),
            final_standings: None,
        })
    }

    /// Number of rounds paired so far; also the number of the next round to pair.
    pub fn current_round(&self) -> u32 {
        self.pairings.len() as u32
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    pub fn participant_by_player(&self, player_id: PlayerId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.player_id == player_id)
    }

    /// Whether every participant's slot for `round` holds a result.
    pub fn is_round_scored(&self, round: u32) -> bool {
        !self.participants.is_empty() && self.participants.iter().all(|p| p.is_scored(round))
    }

    /// Replace the configuration (Created only). Participants' round slots follow the new round
    /// count and scores are recomputed under the new point scheme.
    pub fn update_config(&mut self, config: TournamentConfig) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        config.check()?;
        let rounds = config.number_of_rounds;
        for p in &mut self.participants {
            p.rounds.truncate(rounds as usize);
            let have = p.rounds.len() as u32;
            p.rounds.extend((have..rounds).map(Scoring::empty));
            p.score = p.rounds.iter().map(|s| config.points.points_for(s.result)).sum();
        }
        self.config = config;
        Ok(())
    }

    /// Enter a player. Allowed while Created, or InProgress when late entry is enabled.
    pub fn add_participant(&mut self, player: &Player) -> Result<ParticipantId, TournamentError> {
        self.add_participant_with_rounds(player, Vec::new())
    }

    /// Enter a player with results imported for some rounds. Remaining slots start empty;
    /// slots of rounds already paired are marked absent.
    pub fn add_participant_with_rounds(
        &mut self,
        player: &Player,
        imported: Vec<Scoring>,
    ) -> Result<ParticipantId, TournamentError> {
        match self.status {
            TournamentStatus::Created => {}
            TournamentStatus::InProgress if self.config.allow_late_entry => {}
            TournamentStatus::InProgress => return Err(TournamentError::LateEntryNotAllowed),
            TournamentStatus::Completed => return Err(TournamentError::TournamentClosed),
        }
        if self.participant_by_player(player.id).is_some() {
            return Err(TournamentError::DuplicateParticipant(player.id));
        }

        let mut participant = Participant::new(player, self.config.number_of_rounds);
        let id = participant.id;
        for scoring in imported {
            let slot = participant
                .scoring_mut(scoring.round_number)
                .ok_or(TournamentError::InvalidRoundNumber {
                    round: scoring.round_number,
                    number_of_rounds: self.config.number_of_rounds,
                })?;
            if slot.result.is_recorded() {
                return Err(TournamentError::DuplicateResult {
                    participant: id,
                    round: scoring.round_number,
                });
            }
            *slot = scoring;
        }
        for round in 0..self.current_round() {
            if let Some(slot) = participant.scoring_mut(round) {
                if !slot.result.is_recorded() {
                    slot.result = GameResult::Absent;
                }
            }
        }
        let points = self.config.points;
        participant.score = participant
            .rounds
            .iter()
            .map(|s| points.points_for(s.result))
            .sum();

        log::debug!("Tournament {}: entered {} as {}", self.id, participant.name, id);
        self.participants.push(participant);
        Ok(id)
    }

    /// Remove a participant (Created only).
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant, TournamentError> {
        self.ensure_editable()?;
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::ParticipantNotFound(id))?;
        Ok(self.participants.remove(idx))
    }

    pub(crate) fn ensure_open(&self) -> Result<(), TournamentError> {
        if self.status == TournamentStatus::Completed {
            return Err(TournamentError::TournamentClosed);
        }
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), TournamentError> {
        match self.status {
            TournamentStatus::Created => Ok(()),
            TournamentStatus::InProgress => Err(TournamentError::ConfigurationFrozen),
            TournamentStatus::Completed => Err(TournamentError::TournamentClosed),
        }
    }
}
