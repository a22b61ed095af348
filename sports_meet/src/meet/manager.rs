//! Meet manager owning the roster, sport catalog and match book.

use chrono::Utc;
use log::info;

use super::settings::MeetSettings;
use super::stats::{MeetStats, ResultEntry, results_board};
use crate::roster::{CategoryGroup, Participant, ParticipantId, Roster, SportCatalog};
use crate::schedule::{
    AutoScheduleOutcome, ManualSelection, Match, MatchBook, MatchId, MeetError, MeetResult,
    ParticipationStatus, RandomShuffler, Shuffler, ValidationError, eligibility, lifecycle,
    scheduler, status,
};

/// Whole-collection copy of the meet, as handed to and from storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetState {
    pub participants: Vec<Participant>,
    pub sports: SportCatalog,
    pub matches: Vec<Match>,
}

/// Entry point for everything the operator does during the meet.
///
/// Mutating operations take `&mut self`, so there is one writer at a time.
/// Every successful mutation bumps [`MeetManager::version`]; a failed one
/// leaves the manager exactly as it was.
pub struct MeetManager {
    roster: Roster,
    catalog: SportCatalog,
    book: MatchBook,
    selection: ManualSelection,
    settings: MeetSettings,
    shuffler: Box<dyn Shuffler + Send>,
    version: u64,
}

impl MeetManager {
    /// Create an empty meet with the given sport catalog
    pub fn new(catalog: SportCatalog, settings: MeetSettings) -> Self {
        Self {
            roster: Roster::new(),
            catalog,
            book: MatchBook::new(),
            selection: ManualSelection::new(),
            settings,
            shuffler: Box::new(RandomShuffler::new()),
            version: 0,
        }
    }

    /// Rebuild a meet from stored collections
    ///
    /// # Errors
    ///
    /// Fails if a stored participant breaks the registration rules, two
    /// participants share an ID, or a stored match is inconsistent
    /// ([`ValidationError::CorruptMatch`]).
    pub fn from_state(state: MeetState, settings: MeetSettings) -> MeetResult<Self> {
        let roster = Roster::from_participants(state.participants, &settings.bands)?;
        let book = MatchBook::from_stored(state.matches, &state.sports)?;
        let mut manager = Self::new(state.sports, settings);
        manager.roster = roster;
        manager.book = book;
        Ok(manager)
    }

    /// Replace the shuffler used by automatic pairing
    pub fn with_shuffler(mut self, shuffler: impl Shuffler + Send + 'static) -> Self {
        self.shuffler = Box::new(shuffler);
        self
    }

    pub fn state(&self) -> MeetState {
        MeetState {
            participants: self.roster.as_slice().to_vec(),
            sports: self.catalog.clone(),
            matches: self.book.as_slice().to_vec(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn catalog(&self) -> &SportCatalog {
        &self.catalog
    }

    pub fn matches(&self) -> &[Match] {
        self.book.as_slice()
    }

    pub fn get_match(&self, id: MatchId) -> MeetResult<&Match> {
        self.book.get(id).ok_or(MeetError::MatchNotFound(id))
    }

    pub fn settings(&self) -> &MeetSettings {
        &self.settings
    }

    pub fn selection(&self) -> &ManualSelection {
        &self.selection
    }

    /// Number of successful mutations so far
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Add participants coming from registration, all or none
    pub fn import_participants(&mut self, participants: Vec<Participant>) -> MeetResult<usize> {
        let mut roster = self.roster.clone();
        let count = participants.len();
        for participant in participants {
            roster.insert(participant, &self.settings.bands)?;
        }

        self.roster = roster;
        self.bump();
        info!("Imported {} participant(s)", count);
        Ok(count)
    }

    /// Remove a participant together with every match they appear in
    pub fn withdraw_participant(&mut self, id: ParticipantId) -> MeetResult<Vec<Match>> {
        let participant = self
            .roster
            .remove(id)
            .ok_or(MeetError::ParticipantNotFound(id))?;
        let removed = self.book.remove_where(|m| m.involves(id));
        self.selection.clear_players();
        self.bump();

        info!(
            "Withdrew participant {} ({}), removing {} match(es)",
            participant.id,
            participant.name,
            removed.len()
        );
        Ok(removed)
    }

    pub fn eligible_pool(&self, sport: &str) -> Vec<&Participant> {
        eligibility::eligible_pool(sport, self.roster.as_slice(), self.book.as_slice())
    }

    pub fn group_keys(&self, sport: &str) -> Vec<CategoryGroup> {
        eligibility::group_keys(&self.eligible_pool(sport))
    }

    pub fn pool_for_group(&self, sport: &str, group: &CategoryGroup) -> Vec<&Participant> {
        eligibility::pool_for_group(&self.eligible_pool(sport), group)
    }

    /// Schedule a match from an explicit selection and clear the picked players
    pub fn create_match(
        &mut self,
        sport: &str,
        group: &CategoryGroup,
        selected: &[ParticipantId],
    ) -> MeetResult<Match> {
        let created = scheduler::create_match(
            &self.catalog,
            sport,
            group,
            selected,
            self.roster.as_slice(),
            &mut self.book,
            Utc::now(),
        )?;
        self.selection.clear_players();
        self.bump();
        Ok(created)
    }

    pub fn select_sport(&mut self, sport: &str) {
        self.selection.select_sport(sport);
    }

    pub fn select_group(&mut self, group: CategoryGroup) {
        self.selection.select_group(group);
    }

    pub fn toggle_player(&mut self, id: ParticipantId) -> bool {
        self.selection.toggle_player(id)
    }

    /// Schedule a match from the manual selection state
    pub fn create_match_from_selection(&mut self) -> MeetResult<Match> {
        let sport = self
            .selection
            .sport()
            .ok_or(ValidationError::NoSportSelected)?
            .to_string();
        let group = *self
            .selection
            .group()
            .ok_or(ValidationError::NoGroupSelected)?;
        let players = self.selection.players().to_vec();

        self.create_match(&sport, &group, &players)
    }

    /// Pair every eligible group of a sport
    pub fn auto_schedule(&mut self, sport: &str) -> MeetResult<AutoScheduleOutcome> {
        let outcome = scheduler::auto_schedule(
            &self.catalog,
            sport,
            self.roster.as_slice(),
            &mut self.book,
            self.shuffler.as_mut(),
            Utc::now(),
        )?;
        if !outcome.is_noop() {
            self.bump();
        }
        Ok(outcome)
    }

    pub fn declare_winner(
        &mut self,
        match_id: MatchId,
        selection: &[ParticipantId],
    ) -> MeetResult<Match> {
        let finished = lifecycle::declare_winner(
            &mut self.book,
            &self.catalog,
            match_id,
            selection,
            self.settings.redeclare_policy(),
            Utc::now(),
        )?;
        self.bump();
        Ok(finished)
    }

    pub fn amend_winner(
        &mut self,
        match_id: MatchId,
        selection: &[ParticipantId],
    ) -> MeetResult<Match> {
        let amended =
            lifecycle::amend_winner(&mut self.book, &self.catalog, match_id, selection, Utc::now())?;
        self.bump();
        Ok(amended)
    }

    pub fn delete_match(&mut self, match_id: MatchId) -> MeetResult<Match> {
        let removed = lifecycle::delete_match(&mut self.book, match_id)?;
        self.bump();
        Ok(removed)
    }

    pub fn status_of(&self, participant: ParticipantId, sport: &str) -> ParticipationStatus {
        status::status_of(participant, sport, self.book.as_slice())
    }

    pub fn status_board(
        &self,
        participant: ParticipantId,
    ) -> MeetResult<Vec<(String, ParticipationStatus)>> {
        let participant = self
            .roster
            .get(participant)
            .ok_or(MeetError::ParticipantNotFound(participant))?;
        Ok(status::status_board(participant, self.book.as_slice()))
    }

    pub fn stats(&self) -> MeetStats {
        MeetStats::collect(self.roster.as_slice(), self.book.as_slice())
    }

    pub fn results(&self) -> Vec<ResultEntry> {
        results_board(self.book.as_slice())
    }
}

impl Default for MeetManager {
    fn default() -> Self {
        Self::new(SportCatalog::default(), MeetSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::GenderGroup;

    fn manager_with_chess_players(count: i64) -> MeetManager {
        let mut manager = MeetManager::default().with_shuffler(|_: &mut [ParticipantId]| {});
        let participants = (1..=count)
            .map(|id| Participant::new(id, format!("P{id}"), 7, GenderGroup::Boys, ["Chess"]).unwrap())
            .collect();
        manager.import_participants(participants).unwrap();
        manager
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut manager = manager_with_chess_players(2);
        let version = manager.version();
        let batch = vec![
            Participant::new(3, "C", 7, GenderGroup::Boys, ["Chess"]).unwrap(),
            Participant::new(1, "Dup", 7, GenderGroup::Boys, ["Chess"]).unwrap(),
        ];
        assert!(manager.import_participants(batch).is_err());
        assert_eq!(manager.roster().len(), 2);
        assert_eq!(manager.version(), version);
    }

    #[test]
    fn test_selection_flow_clears_players_only() {
        let mut manager = manager_with_chess_players(4);
        let group: CategoryGroup = "Middle-Boys".parse().unwrap();

        manager.select_sport("Chess");
        manager.select_group(group);
        manager.toggle_player(1);
        manager.toggle_player(2);
        let m = manager.create_match_from_selection().unwrap();

        assert_eq!(m.player_ids, vec![1, 2]);
        assert_eq!(manager.selection().sport(), Some("Chess"));
        assert_eq!(manager.selection().group(), Some(&group));
        assert!(manager.selection().players().is_empty());
    }

    #[test]
    fn test_selection_without_group() {
        let mut manager = manager_with_chess_players(2);
        manager.select_sport("Chess");
        assert_eq!(
            manager.create_match_from_selection(),
            Err(ValidationError::NoGroupSelected.into())
        );
    }

    #[test]
    fn test_failed_selection_keeps_players() {
        let mut manager = manager_with_chess_players(2);
        manager.select_sport("Chess");
        manager.select_group("Middle-Boys".parse().unwrap());
        manager.toggle_player(1);
        assert!(manager.create_match_from_selection().is_err());
        assert_eq!(manager.selection().players(), &[1]);
    }

    #[test]
    fn test_version_bumps_only_on_success() {
        let mut manager = manager_with_chess_players(3);
        let start = manager.version();

        manager.auto_schedule("Chess").unwrap();
        assert_eq!(manager.version(), start + 1);

        let outcome = manager.auto_schedule("Chess").unwrap();
        assert!(outcome.is_noop());
        assert_eq!(manager.version(), start + 1);

        assert!(manager.delete_match(999).is_err());
        assert_eq!(manager.version(), start + 1);
    }

    #[test]
    fn test_withdraw_removes_matches() {
        let mut manager = manager_with_chess_players(4);
        manager.auto_schedule("Chess").unwrap();
        assert_eq!(manager.matches().len(), 2);

        let removed = manager.withdraw_participant(1).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(manager.matches().len(), 1);
        assert!(manager.roster().get(1).is_none());
        // Player 2 lost their opponent and is back in the pool
        assert_eq!(manager.eligible_pool("Chess").len(), 1);

        assert_eq!(
            manager.withdraw_participant(1),
            Err(MeetError::ParticipantNotFound(1))
        );
    }

    #[test]
    fn test_strict_settings_reject_redeclare() {
        let settings = MeetSettings {
            strict_winner_declaration: true,
            ..Default::default()
        };
        let mut manager = MeetManager::new(SportCatalog::default(), settings);
        manager
            .import_participants(vec![
                Participant::new(1, "A", 9, GenderGroup::Girls, ["Chess"]).unwrap(),
                Participant::new(2, "B", 9, GenderGroup::Girls, ["Chess"]).unwrap(),
            ])
            .unwrap();
        let m = manager
            .create_match("Chess", &"Senior-Girls".parse().unwrap(), &[1, 2])
            .unwrap();

        manager.declare_winner(m.id, &[1]).unwrap();
        assert!(manager.declare_winner(m.id, &[2]).is_err());
        let amended = manager.amend_winner(m.id, &[2]).unwrap();
        assert_eq!(amended.winner.unwrap().members(), &[2]);
    }

    #[test]
    fn test_from_state_rejects_corrupt_matches() {
        let mut manager = manager_with_chess_players(3);
        manager
            .create_match("Chess", &"Middle-Boys".parse().unwrap(), &[1, 2])
            .unwrap();
        let mut state = manager.state();
        state.matches[0].status = crate::schedule::MatchStatus::Finished;

        let result = MeetManager::from_state(state, MeetSettings::default());
        assert!(matches!(
            result,
            Err(MeetError::Validation(ValidationError::CorruptMatch { match_id: 1, .. }))
        ));
    }

    #[test]
    fn test_state_round_trip() {
        let mut manager = manager_with_chess_players(2);
        manager.auto_schedule("Chess").unwrap();

        let state = manager.state();
        let restored = MeetManager::from_state(state.clone(), MeetSettings::default()).unwrap();
        assert_eq!(restored.state(), state);
        assert_eq!(restored.eligible_pool("Chess").len(), 0);
    }
}
