//! Match lifecycle: winner declaration, correction and deletion.
//!
//! A match starts `Scheduled` and becomes `Finished` once a winner is
//! declared. It never returns to `Scheduled`. Deleting a match removes the
//! record in either state and puts its players back in the eligible pool.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashSet;

use super::errors::{MeetError, MeetResult, ValidationError};
use super::models::{Match, MatchBook, MatchId, MatchStatus, Winner};
use super::scheduler::resolve_sport;
use crate::roster::{ParticipantId, SportCatalog};

/// How `declare_winner` treats a match that already has a winner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedeclarePolicy {
    /// Overwrite the previous winner
    #[default]
    Overwrite,
    /// Reject; corrections go through `amend_winner`
    Reject,
}

/// Turn a selection into a winner for this match.
///
/// Team sports accept exactly one positional side (`[p0, p1]` or `[p2, p3]`,
/// in any order within the side). Other sports accept one player of the match.
pub fn resolve_winner(
    m: &Match,
    catalog: &SportCatalog,
    selection: &[ParticipantId],
) -> Result<Winner, ValidationError> {
    let sport = resolve_sport(catalog, &m.sport)?;

    match sport.team_size() {
        Some(team_size) => {
            if selection.len() != team_size {
                return Err(ValidationError::WrongWinnerCount {
                    match_id: m.id,
                    expected: team_size,
                    actual: selection.len(),
                });
            }

            let picked: HashSet<ParticipantId> = selection.iter().copied().collect();
            m.sides(team_size)
                .find(|side| {
                    side.len() == picked.len() && side.iter().all(|id| picked.contains(id))
                })
                .map(|side| Winner::Team(side.to_vec()))
                .ok_or_else(|| ValidationError::NotATeamSide {
                    match_id: m.id,
                    selection: selection.to_vec(),
                })
        }
        None => match selection {
            [player] if m.involves(*player) => Ok(Winner::Single(*player)),
            [player] => Err(ValidationError::WinnerNotInMatch {
                match_id: m.id,
                player: *player,
            }),
            _ => Err(ValidationError::WrongWinnerCount {
                match_id: m.id,
                expected: 1,
                actual: selection.len(),
            }),
        },
    }
}

fn finish(m: &mut Match, winner: Winner, now: DateTime<Utc>) {
    m.winner = Some(winner);
    m.status = MatchStatus::Finished;
    m.finished_at = Some(now);
}

/// Declare the winner of a match and mark it finished
///
/// # Errors
///
/// * `MatchNotFound` if the match does not exist
/// * a validation error if the selection is not a legal winner, or if the
///   match is already finished under [`RedeclarePolicy::Reject`]
pub fn declare_winner(
    book: &mut MatchBook,
    catalog: &SportCatalog,
    match_id: MatchId,
    selection: &[ParticipantId],
    policy: RedeclarePolicy,
    now: DateTime<Utc>,
) -> MeetResult<Match> {
    let m = book
        .get_mut(match_id)
        .ok_or(MeetError::MatchNotFound(match_id))?;

    if m.is_finished() && policy == RedeclarePolicy::Reject {
        warn!("Match {match_id} is already finished");
        return Err(ValidationError::AlreadyFinished(match_id).into());
    }

    let winner = resolve_winner(m, catalog, selection).inspect_err(|e| {
        warn!("Rejected winner for match {match_id}: {e}");
    })?;

    if let Some(previous) = &m.winner {
        info!(
            "Match {} winner changed from {:?} to {:?}",
            match_id,
            previous.members(),
            winner.members()
        );
    } else {
        info!("Match {} won by {:?}", match_id, winner.members());
    }

    finish(m, winner, now);
    Ok(m.clone())
}

/// Correct the winner of a finished match
///
/// # Errors
///
/// * `MatchNotFound` if the match does not exist
/// * `NotFinished` if the match has no winner yet
/// * a validation error if the selection is not a legal winner
pub fn amend_winner(
    book: &mut MatchBook,
    catalog: &SportCatalog,
    match_id: MatchId,
    selection: &[ParticipantId],
    now: DateTime<Utc>,
) -> MeetResult<Match> {
    let m = book
        .get_mut(match_id)
        .ok_or(MeetError::MatchNotFound(match_id))?;

    if !m.is_finished() {
        return Err(ValidationError::NotFinished(match_id).into());
    }

    let winner = resolve_winner(m, catalog, selection)?;
    info!("Match {} winner amended to {:?}", match_id, winner.members());
    finish(m, winner, now);
    Ok(m.clone())
}

/// Remove a match, scheduled or finished
pub fn delete_match(book: &mut MatchBook, match_id: MatchId) -> MeetResult<Match> {
    let removed = book
        .remove(match_id)
        .ok_or(MeetError::MatchNotFound(match_id))?;

    info!(
        "Deleted {} match {} ({} {})",
        removed.status, removed.id, removed.sport, removed.category_group
    );

    Ok(removed)
}
