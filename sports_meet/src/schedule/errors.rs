//! Scheduling error types.

use thiserror::Error;

use super::models::MatchId;
use crate::roster::{ParticipantId, RosterError};

/// Rejected input. The operation aborts and no state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No sport selected")]
    NoSportSelected,

    #[error("No category group selected")]
    NoGroupSelected,

    #[error("Unknown sport: {0}")]
    UnknownSport(String),

    #[error("{sport} needs exactly {expected} players, got {actual}")]
    WrongPlayerCount {
        sport: String,
        expected: usize,
        actual: usize,
    },

    #[error("Player {0} selected more than once")]
    DuplicatePlayer(ParticipantId),

    #[error("Player {player} is not eligible for {sport} in {group}")]
    IneligiblePlayer {
        player: ParticipantId,
        sport: String,
        group: String,
    },

    #[error("Match {match_id} needs a winner selection of {expected} player(s), got {actual}")]
    WrongWinnerCount {
        match_id: MatchId,
        expected: usize,
        actual: usize,
    },

    #[error("Player {player} did not play in match {match_id}")]
    WinnerNotInMatch {
        match_id: MatchId,
        player: ParticipantId,
    },

    #[error("Selection {selection:?} is not one of the sides of match {match_id}")]
    NotATeamSide {
        match_id: MatchId,
        selection: Vec<ParticipantId>,
    },

    #[error("Match {0} is already finished; amend the winner instead")]
    AlreadyFinished(MatchId),

    #[error("Match {0} has no winner to amend")]
    NotFinished(MatchId),

    #[error("Stored match {match_id} is inconsistent: {reason}")]
    CorruptMatch { match_id: MatchId, reason: String },
}

/// Errors returned by meet operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
}

impl MeetError {
    /// Message for the operator; stale-reference errors ask for a refresh
    pub fn client_message(&self) -> String {
        match self {
            MeetError::MatchNotFound(_) => {
                "That match no longer exists. Refresh the match list.".to_string()
            }
            MeetError::ParticipantNotFound(_) => {
                "That participant no longer exists. Refresh the roster.".to_string()
            }
            MeetError::Validation(e) => e.to_string(),
            MeetError::Roster(e) => e.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, MeetError::Validation(_) | MeetError::Roster(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MeetError::MatchNotFound(_) | MeetError::ParticipantNotFound(_)
        )
    }
}

/// Result type for meet operations
pub type MeetResult<T> = Result<T, MeetError>;
