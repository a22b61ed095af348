//! Match creation: manual pairing and automatic batch pairing.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};

use super::eligibility::{eligible_pool, partition, pool_for_group};
use super::errors::{MeetResult, ValidationError};
use super::models::{Match, MatchBook, MatchStatus};
use super::shuffle::Shuffler;
use crate::roster::{CategoryGroup, Participant, ParticipantId, SportCatalog, SportConfig};

/// Look up a sport by name, treating a blank name as "nothing selected"
pub fn resolve_sport<'a>(
    catalog: &'a SportCatalog,
    sport: &str,
) -> Result<&'a SportConfig, ValidationError> {
    if sport.trim().is_empty() {
        return Err(ValidationError::NoSportSelected);
    }

    catalog
        .get(sport)
        .ok_or_else(|| ValidationError::UnknownSport(sport.to_string()))
}

/// Check a manual pairing against the current state without changing it
pub fn validate_selection<'a>(
    catalog: &'a SportCatalog,
    sport: &str,
    group: &CategoryGroup,
    selected: &[ParticipantId],
    participants: &[Participant],
    matches: &[Match],
) -> Result<&'a SportConfig, ValidationError> {
    let config = resolve_sport(catalog, sport)?;

    if selected.len() != config.players_per_match() {
        return Err(ValidationError::WrongPlayerCount {
            sport: config.name.clone(),
            expected: config.players_per_match(),
            actual: selected.len(),
        });
    }

    let mut seen = HashSet::with_capacity(selected.len());
    for &id in selected {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicatePlayer(id));
        }
    }

    let pool = eligible_pool(sport, participants, matches);
    let group_pool: HashSet<ParticipantId> = pool_for_group(&pool, group)
        .iter()
        .map(|p| p.id)
        .collect();

    if let Some(&player) = selected.iter().find(|id| !group_pool.contains(*id)) {
        return Err(ValidationError::IneligiblePlayer {
            player,
            sport: config.name.clone(),
            group: group.to_string(),
        });
    }

    Ok(config)
}

/// Create one scheduled match from an explicit player selection
///
/// # Errors
///
/// Returns a validation error naming the first unmet precondition; the book
/// is untouched in that case.
pub fn create_match(
    catalog: &SportCatalog,
    sport: &str,
    group: &CategoryGroup,
    selected: &[ParticipantId],
    participants: &[Participant],
    book: &mut MatchBook,
    now: DateTime<Utc>,
) -> MeetResult<Match> {
    if let Err(e) = validate_selection(catalog, sport, group, selected, participants, book.as_slice())
    {
        warn!("Rejected manual pairing for {sport} {group}: {e}");
        return Err(e.into());
    }

    let id = book.allocate_id();
    let created = Match::scheduled(id, sport, *group, selected.to_vec(), now);
    book.append(vec![created.clone()]);

    info!(
        "Scheduled match {} ({} {}): {:?}",
        created.id, created.sport, created.category_group, created.player_ids
    );

    Ok(created)
}

/// One batch of players the automatic pass wants to pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMatch {
    pub category_group: CategoryGroup,
    pub player_ids: Vec<ParticipantId>,
}

/// Result of planning an automatic pass, before anything is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoPlan {
    pub batches: Vec<PlannedMatch>,
    /// Players left over in each group because the group did not divide evenly
    pub leftovers: BTreeMap<CategoryGroup, Vec<ParticipantId>>,
    /// Batches dropped because an identical scheduled match already exists
    pub duplicates_skipped: usize,
}

/// Plan an automatic pass for one sport.
///
/// Each category group is shuffled on its own and cut into consecutive
/// batches of `players_per_match`. A short tail is left over. Batches that
/// repeat the lineup of an existing scheduled match in the same group are
/// skipped.
pub fn plan_auto_schedule(
    sport: &SportConfig,
    participants: &[Participant],
    matches: &[Match],
    shuffler: &mut dyn Shuffler,
) -> AutoPlan {
    let size = sport.players_per_match();
    let pool: Vec<&Participant> = eligible_pool(&sport.name, participants, matches)
        .into_iter()
        .filter(|p| p.plays(&sport.name))
        .collect();

    let mut plan = AutoPlan::default();

    for (group, members) in partition(&pool) {
        let mut ids: Vec<ParticipantId> = members.iter().map(|p| p.id).collect();
        shuffler.shuffle(&mut ids);

        let mut batches = ids.chunks_exact(size);
        for batch in batches.by_ref() {
            if is_duplicate_batch(&sport.name, &group, batch, matches) {
                plan.duplicates_skipped += 1;
                continue;
            }

            plan.batches.push(PlannedMatch {
                category_group: group,
                player_ids: batch.to_vec(),
            });
        }

        let remainder = batches.remainder();
        if !remainder.is_empty() {
            debug!(
                "{} {}: {} player(s) left over",
                sport.name,
                group,
                remainder.len()
            );
            plan.leftovers.insert(group, remainder.to_vec());
        }
    }

    plan
}

/// Whether a scheduled match of the same sport and group already has this lineup
pub fn is_duplicate_batch(
    sport: &str,
    group: &CategoryGroup,
    batch: &[ParticipantId],
    matches: &[Match],
) -> bool {
    matches.iter().any(|m| {
        m.sport == sport
            && m.category_group == *group
            && m.status == MatchStatus::Scheduled
            && m.has_lineup(batch)
    })
}

/// Why an automatic pass created nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    /// No sport was chosen
    NoSportSelected,
    /// No group has enough eligible players for a full match
    NotEnoughPlayers {
        sport: String,
        leftovers: BTreeMap<CategoryGroup, Vec<ParticipantId>>,
    },
    /// Every batch repeated an existing scheduled match
    AlreadyScheduled { sport: String },
}

/// Matches written by an automatic pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoScheduleReport {
    pub sport: String,
    pub created: Vec<Match>,
    pub leftovers: BTreeMap<CategoryGroup, Vec<ParticipantId>>,
    pub duplicates_skipped: usize,
}

/// Outcome of [`auto_schedule`]; a no-op is a normal result, not an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoScheduleOutcome {
    Scheduled(AutoScheduleReport),
    NoOp(NoOpReason),
}

impl AutoScheduleOutcome {
    /// Matches created by the pass; empty for a no-op
    pub fn created(&self) -> &[Match] {
        match self {
            AutoScheduleOutcome::Scheduled(report) => &report.created,
            AutoScheduleOutcome::NoOp(_) => &[],
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, AutoScheduleOutcome::NoOp(_))
    }
}

/// Pair every eligible group of a sport and append the matches in one step
///
/// # Errors
///
/// Only an unknown sport name is an error. A blank sport or a pass that
/// creates nothing returns [`AutoScheduleOutcome::NoOp`].
pub fn auto_schedule(
    catalog: &SportCatalog,
    sport: &str,
    participants: &[Participant],
    book: &mut MatchBook,
    shuffler: &mut dyn Shuffler,
    now: DateTime<Utc>,
) -> MeetResult<AutoScheduleOutcome> {
    let config = match resolve_sport(catalog, sport) {
        Ok(config) => config,
        Err(ValidationError::NoSportSelected) => {
            return Ok(AutoScheduleOutcome::NoOp(NoOpReason::NoSportSelected));
        }
        Err(e) => return Err(e.into()),
    };

    let plan = plan_auto_schedule(config, participants, book.as_slice(), shuffler);

    if plan.batches.is_empty() {
        let reason = if plan.duplicates_skipped > 0 {
            NoOpReason::AlreadyScheduled {
                sport: config.name.clone(),
            }
        } else {
            NoOpReason::NotEnoughPlayers {
                sport: config.name.clone(),
                leftovers: plan.leftovers,
            }
        };
        info!("Auto-schedule for {} created no matches", config.name);
        return Ok(AutoScheduleOutcome::NoOp(reason));
    }

    let created: Vec<Match> = plan
        .batches
        .into_iter()
        .map(|batch| {
            Match::scheduled(
                book.allocate_id(),
                &config.name,
                batch.category_group,
                batch.player_ids,
                now,
            )
        })
        .collect();
    book.append(created.clone());

    info!(
        "Auto-scheduled {} match(es) for {} ({} duplicate batch(es) skipped)",
        created.len(),
        config.name,
        plan.duplicates_skipped
    );

    Ok(AutoScheduleOutcome::Scheduled(AutoScheduleReport {
        sport: config.name.clone(),
        created,
        leftovers: plan.leftovers,
        duplicates_skipped: plan.duplicates_skipped,
    }))
}

/// Working state of the manual pairing form.
///
/// Picking a sport resets the group and players; picking a group resets the
/// players. A successful manual pairing clears only the players so the next
/// match can be entered for the same sport and group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualSelection {
    sport: Option<String>,
    group: Option<CategoryGroup>,
    players: Vec<ParticipantId>,
}

impl ManualSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_sport(&mut self, sport: impl Into<String>) {
        let sport = sport.into();
        self.sport = (!sport.trim().is_empty()).then_some(sport);
        self.group = None;
        self.players.clear();
    }

    pub fn select_group(&mut self, group: CategoryGroup) {
        self.group = Some(group);
        self.players.clear();
    }

    /// Add or remove a player; returns whether the player is now selected
    pub fn toggle_player(&mut self, id: ParticipantId) -> bool {
        if let Some(index) = self.players.iter().position(|&p| p == id) {
            self.players.remove(index);
            false
        } else {
            self.players.push(id);
            true
        }
    }

    pub fn clear_players(&mut self) {
        self.players.clear();
    }

    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref()
    }

    pub fn group(&self) -> Option<&CategoryGroup> {
        self.group.as_ref()
    }

    pub fn players(&self) -> &[ParticipantId] {
        &self.players
    }
}
