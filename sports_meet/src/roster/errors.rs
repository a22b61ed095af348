//! Roster error types.

use thiserror::Error;

use super::models::ParticipantId;

/// Errors raised while building participants, sports or the roster itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Participant name must not be blank")]
    EmptyName,

    #[error("Participant must register for at least one sport")]
    NoSports,

    #[error("Too many sports: {count} selected, at most {max} allowed")]
    TooManySports { count: usize, max: usize },

    #[error("Participant {0} is already registered")]
    DuplicateParticipant(ParticipantId),

    #[error("Sport {0} is already in the catalog")]
    DuplicateSport(String),

    #[error("Sport name must not be blank")]
    EmptySportName,

    #[error("Sport {sport} needs at least 2 players per match, got {players}")]
    InvalidPlayersPerMatch { sport: String, players: usize },

    #[error("Sport {0} has a fixed player count")]
    FixedSize(String),

    #[error("Unknown gender group: {0}")]
    UnknownGender(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid category group key: {0}")]
    InvalidCategoryGroup(String),

    #[error("Invalid category bands: {0}")]
    InvalidBands(String),
}

/// Result type for roster operations
pub type RosterResult<T> = Result<T, RosterError>;
