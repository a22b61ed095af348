//! Dashboard numbers and the results board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::roster::{Category, CategoryGroup, Participant, ParticipantId};
use crate::schedule::{Match, MatchId, MatchStatus};

/// Meet-wide counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetStats {
    pub total_participants: usize,
    pub total_matches: usize,
    pub matches_scheduled: usize,
    pub matches_finished: usize,
    pub participants_by_category: BTreeMap<Category, usize>,
    /// Finished share of all matches, rounded to a whole percent
    pub progress_percent: u8,
}

impl MeetStats {
    pub fn collect(participants: &[Participant], matches: &[Match]) -> Self {
        let matches_finished = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Finished)
            .count();

        let mut participants_by_category = BTreeMap::new();
        for p in participants {
            *participants_by_category.entry(p.category).or_insert(0) += 1;
        }

        let progress_percent = if matches.is_empty() {
            0
        } else {
            ((matches_finished as f64 / matches.len() as f64) * 100.0).round() as u8
        };

        Self {
            total_participants: participants.len(),
            total_matches: matches.len(),
            matches_scheduled: matches.len() - matches_finished,
            matches_finished,
            participants_by_category,
            progress_percent,
        }
    }
}

/// One finished match on the results board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub match_id: MatchId,
    pub sport: String,
    pub category_group: CategoryGroup,
    pub winners: Vec<ParticipantId>,
    pub others: Vec<ParticipantId>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Finished matches, most recently finished first
pub fn results_board(matches: &[Match]) -> Vec<ResultEntry> {
    let mut entries: Vec<ResultEntry> = matches
        .iter()
        .filter_map(|m| {
            let winner = m.winner.as_ref()?;
            Some(ResultEntry {
                match_id: m.id,
                sport: m.sport.clone(),
                category_group: m.category_group,
                winners: winner.members().to_vec(),
                others: m.losers(),
                finished_at: m.finished_at,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.finished_at
            .cmp(&a.finished_at)
            .then(b.match_id.cmp(&a.match_id))
    });
    entries
}
