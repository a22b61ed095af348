//! Who may still be paired for a sport.
//!
//! A participant is eligible for a sport when they registered for it and do
//! not appear in any match of that sport, whatever its status. A player gets
//! one match per sport for the lifetime of the data set; deleting the match
//! is the only way back into the pool.

use log::debug;
use std::collections::{BTreeMap, HashSet};

use super::models::Match;
use crate::roster::{CategoryGroup, Participant, ParticipantId};

/// IDs of every player who appears in a match of `sport`
pub fn busy_players(sport: &str, matches: &[Match]) -> HashSet<ParticipantId> {
    matches
        .iter()
        .filter(|m| m.sport == sport)
        .flat_map(|m| m.player_ids.iter().copied())
        .collect()
}

/// Registered participants of `sport` who never appeared in one of its matches
pub fn eligible_pool<'a>(
    sport: &str,
    participants: &'a [Participant],
    matches: &[Match],
) -> Vec<&'a Participant> {
    let busy = busy_players(sport, matches);

    let pool: Vec<&Participant> = participants
        .iter()
        .filter(|p| p.plays(sport) && !busy.contains(&p.id))
        .collect();

    debug!(
        "Eligible pool for {}: {} of {} participants ({} busy)",
        sport,
        pool.len(),
        participants.len(),
        busy.len()
    );

    pool
}

/// Distinct category groups present in the pool, sorted by key.
///
/// An empty pool yields an empty list.
pub fn group_keys(pool: &[&Participant]) -> Vec<CategoryGroup> {
    let mut keys: Vec<CategoryGroup> = pool
        .iter()
        .map(|p| p.category_group())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    keys.sort();
    keys
}

/// The part of the pool in one category group, in pool order
pub fn pool_for_group<'a>(pool: &[&'a Participant], group: &CategoryGroup) -> Vec<&'a Participant> {
    pool.iter()
        .copied()
        .filter(|p| p.category_group() == *group)
        .collect()
}

/// Split the pool by category group, keeping pool order inside each group
pub fn partition<'a>(pool: &[&'a Participant]) -> BTreeMap<CategoryGroup, Vec<&'a Participant>> {
    let mut groups: BTreeMap<CategoryGroup, Vec<&Participant>> = BTreeMap::new();
    for &participant in pool {
        groups
            .entry(participant.category_group())
            .or_default()
            .push(participant);
    }
    groups
}
