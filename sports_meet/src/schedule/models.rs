//! Match data models and the match store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use super::errors::ValidationError;
use crate::roster::{CategoryGroup, ParticipantId, SportCatalog};

/// Match ID type
pub type MatchId = i64;

/// Match state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Players assigned, no result yet
    Scheduled,
    /// Winner declared
    Finished,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Declared result of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// Head-to-head formats
    Single(ParticipantId),
    /// Team formats: one positional side of the match
    Team(Vec<ParticipantId>),
}

impl Winner {
    pub fn members(&self) -> &[ParticipantId] {
        match self {
            Winner::Single(id) => std::slice::from_ref(id),
            Winner::Team(ids) => ids,
        }
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.members().contains(&id)
    }
}

/// A single pairing of players for one sport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub sport: String,
    pub category_group: CategoryGroup,
    /// Ordered; team sides are consecutive pairs
    pub player_ids: Vec<ParticipantId>,
    pub status: MatchStatus,
    pub winner: Option<Winner>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Match {
    pub(crate) fn scheduled(
        id: MatchId,
        sport: &str,
        category_group: CategoryGroup,
        player_ids: Vec<ParticipantId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sport: sport.to_string(),
            category_group,
            player_ids,
            status: MatchStatus::Scheduled,
            winner: None,
            created_at,
            finished_at: None,
        }
    }

    pub fn involves(&self, id: ParticipantId) -> bool {
        self.player_ids.contains(&id)
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Order-independent comparison of the player list
    pub fn has_lineup(&self, ids: &[ParticipantId]) -> bool {
        if self.player_ids.len() != ids.len() {
            return false;
        }
        let ours: HashSet<_> = self.player_ids.iter().collect();
        let theirs: HashSet<_> = ids.iter().collect();
        ours == theirs
    }

    /// Consecutive sides of `team_size` players: `[p0, p1], [p2, p3], ...`
    pub fn sides(&self, team_size: usize) -> impl Iterator<Item = &[ParticipantId]> {
        self.player_ids.chunks(team_size.max(1))
    }

    /// Players not on the winning side; empty while scheduled
    pub fn losers(&self) -> Vec<ParticipantId> {
        match &self.winner {
            Some(winner) => self
                .player_ids
                .iter()
                .copied()
                .filter(|id| !winner.contains(*id))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// All matches of the meet plus the next match ID to hand out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBook {
    matches: Vec<Match>,
    next_id: MatchId,
}

impl MatchBook {
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild from a stored collection; IDs continue after the highest one
    pub fn from_matches(matches: Vec<Match>) -> Self {
        let next_id = matches.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self { matches, next_id }
    }

    /// Rebuild from a stored collection, rejecting matches that could not
    /// have been produced by scheduling and winner declaration.
    ///
    /// Checked per match: unique ID, no repeated player, the player count of
    /// the sport (when the sport is still offered), a winner exactly when
    /// finished, and winners drawn from the match's players. Across matches a
    /// player appears at most once per sport.
    pub fn from_stored(
        matches: Vec<Match>,
        catalog: &SportCatalog,
    ) -> Result<Self, ValidationError> {
        let mut ids = HashSet::new();
        let mut entries: HashMap<(String, ParticipantId), MatchId> = HashMap::new();

        for m in &matches {
            let corrupt = |reason: String| ValidationError::CorruptMatch {
                match_id: m.id,
                reason,
            };

            if !ids.insert(m.id) {
                return Err(corrupt("duplicate match ID".to_string()));
            }

            if let Some(sport) = catalog.get(&m.sport) {
                if m.player_ids.len() != sport.players_per_match() {
                    return Err(corrupt(format!(
                        "{} needs {} players, found {}",
                        m.sport,
                        sport.players_per_match(),
                        m.player_ids.len()
                    )));
                }
            }

            match (m.status, &m.winner) {
                (MatchStatus::Finished, None) => {
                    return Err(corrupt("finished without a winner".to_string()));
                }
                (MatchStatus::Scheduled, Some(_)) => {
                    return Err(corrupt("scheduled but has a winner".to_string()));
                }
                (_, Some(winner)) => {
                    if let Some(id) = winner.members().iter().find(|id| !m.involves(**id)) {
                        return Err(corrupt(format!("winner {id} did not play")));
                    }
                }
                (MatchStatus::Scheduled, None) => {}
            }

            let mut seen = HashSet::new();
            for &player in &m.player_ids {
                if !seen.insert(player) {
                    return Err(corrupt(format!("player {player} listed twice")));
                }
                if let Some(other) = entries.insert((m.sport.clone(), player), m.id) {
                    return Err(corrupt(format!(
                        "player {player} is also in match {other} for {}",
                        m.sport
                    )));
                }
            }
        }

        Ok(Self::from_matches(matches))
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn for_sport<'a>(&'a self, sport: &'a str) -> impl Iterator<Item = &'a Match> + 'a {
        self.matches.iter().filter(move |m| m.sport == sport)
    }

    pub fn as_slice(&self) -> &[Match] {
        &self.matches
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    pub(crate) fn allocate_id(&mut self) -> MatchId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append new matches in one step
    pub(crate) fn append(&mut self, matches: Vec<Match>) {
        self.matches.extend(matches);
    }

    pub(crate) fn remove(&mut self, id: MatchId) -> Option<Match> {
        let index = self.matches.iter().position(|m| m.id == id)?;
        Some(self.matches.remove(index))
    }

    /// Remove every match that satisfies `pred`, returning the removed ones
    pub(crate) fn remove_where(&mut self, pred: impl Fn(&Match) -> bool) -> Vec<Match> {
        let (removed, kept): (Vec<Match>, Vec<Match>) = std::mem::take(&mut self.matches)
            .into_iter()
            .partition(|m| pred(m));
        self.matches = kept;
        removed
    }
}

impl Default for MatchBook {
    fn default() -> Self {
        Self::new()
    }
}
