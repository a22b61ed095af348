//! Per-sport participation status for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::models::{Match, MatchStatus};
use crate::roster::{Participant, ParticipantId};

/// Where a participant stands in one sport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticipationStatus {
    NotPlayed,
    Playing,
    Played,
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipationStatus::NotPlayed => write!(f, "not-played"),
            ParticipationStatus::Playing => write!(f, "playing"),
            ParticipationStatus::Played => write!(f, "played"),
        }
    }
}

/// Status of one participant in one sport.
///
/// A finished match wins over a scheduled one, even though a participant
/// should never be in both for the same sport.
pub fn status_of(participant: ParticipantId, sport: &str, matches: &[Match]) -> ParticipationStatus {
    let mut in_scheduled = false;

    for m in matches
        .iter()
        .filter(|m| m.sport == sport && m.involves(participant))
    {
        match m.status {
            MatchStatus::Finished => return ParticipationStatus::Played,
            MatchStatus::Scheduled => in_scheduled = true,
        }
    }

    if in_scheduled {
        ParticipationStatus::Playing
    } else {
        ParticipationStatus::NotPlayed
    }
}

/// Status in every sport the participant registered for, in registration order
pub fn status_board(
    participant: &Participant,
    matches: &[Match],
) -> Vec<(String, ParticipationStatus)> {
    participant
        .sports
        .iter()
        .map(|sport| (sport.clone(), status_of(participant.id, sport, matches)))
        .collect()
}
