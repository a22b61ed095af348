//! Participant and sport data models.

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

use super::category::{Category, CategoryBands};
use super::errors::{RosterError, RosterResult};

/// Participant ID type
pub type ParticipantId = i64;

/// Maximum number of sports a participant may register for
pub const MAX_SPORTS_PER_PARTICIPANT: usize = 3;

/// Default number of players in a match
pub const DEFAULT_PLAYERS_PER_MATCH: usize = 2;

/// Player count of the fixed 2-vs-2 team formats
pub const TEAM_MATCH_PLAYERS: usize = 4;

/// Gender group used to split categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GenderGroup {
    Boys,
    Girls,
}

impl fmt::Display for GenderGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderGroup::Boys => write!(f, "Boys"),
            GenderGroup::Girls => write!(f, "Girls"),
        }
    }
}

impl FromStr for GenderGroup {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boys" | "boy" => Ok(GenderGroup::Boys),
            "girls" | "girl" => Ok(GenderGroup::Girls),
            other => Err(RosterError::UnknownGender(other.to_string())),
        }
    }
}

/// Category and gender combination that partitions a sport's entrants.
///
/// Rendered as `"{category}-{gender}"`, e.g. `Middle-Boys`. The derived
/// ordering agrees with the ordering of the rendered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CategoryGroup {
    pub category: Category,
    pub gender: GenderGroup,
}

impl CategoryGroup {
    pub fn new(category: Category, gender: GenderGroup) -> Self {
        Self { category, gender }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.gender)
    }
}

impl FromStr for CategoryGroup {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, gender) = s
            .rsplit_once('-')
            .ok_or_else(|| RosterError::InvalidCategoryGroup(s.to_string()))?;
        let category = category
            .parse()
            .map_err(|_| RosterError::InvalidCategoryGroup(s.to_string()))?;
        let gender = gender
            .parse()
            .map_err(|_| RosterError::InvalidCategoryGroup(s.to_string()))?;
        Ok(Self { category, gender })
    }
}

impl From<CategoryGroup> for String {
    fn from(group: CategoryGroup) -> Self {
        group.to_string()
    }
}

impl TryFrom<String> for CategoryGroup {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A registered participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub grade: i32,
    pub gender: GenderGroup,
    /// Derived from `grade`; recomputed whenever the roster accepts the record
    #[serde(default)]
    pub category: Category,
    /// Registered sports in the order they were picked
    pub sports: Vec<String>,
}

impl Participant {
    /// Create a participant, classifying the grade with the default bands
    ///
    /// # Errors
    ///
    /// Fails if the name is blank or the sport list is empty or too long.
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        grade: i32,
        gender: GenderGroup,
        sports: impl IntoIterator<Item = impl Into<String>>,
    ) -> RosterResult<Self> {
        let mut participant = Self {
            id,
            name: name.into(),
            grade,
            gender,
            category: Category::Unknown,
            sports: sports.into_iter().map(Into::into).collect(),
        };

        participant.dedup_sports();
        participant.classify(&CategoryBands::default());
        participant.validate()?;
        Ok(participant)
    }

    /// Check the registration rules
    pub fn validate(&self) -> RosterResult<()> {
        if self.name.trim().is_empty() {
            return Err(RosterError::EmptyName);
        }

        if self.sports.is_empty() {
            return Err(RosterError::NoSports);
        }

        if self.sports.len() > MAX_SPORTS_PER_PARTICIPANT {
            return Err(RosterError::TooManySports {
                count: self.sports.len(),
                max: MAX_SPORTS_PER_PARTICIPANT,
            });
        }

        Ok(())
    }

    /// Drop repeated sport names, keeping the first occurrence
    pub fn dedup_sports(&mut self) {
        let mut seen = HashSet::new();
        self.sports.retain(|sport| seen.insert(sport.clone()));
    }

    /// Recompute the category from the grade
    pub fn classify(&mut self, bands: &CategoryBands) {
        self.category = bands.classify(self.grade);
    }

    pub fn plays(&self, sport: &str) -> bool {
        self.sports.iter().any(|s| s == sport)
    }

    pub fn category_group(&self) -> CategoryGroup {
        CategoryGroup::new(self.category, self.gender)
    }
}

/// Per-sport match format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SportRecord")]
pub struct SportConfig {
    pub name: String,
    players_per_match: usize,
    /// Team formats whose player count cannot be edited
    #[serde(default)]
    is_fixed_size: bool,
}

impl SportConfig {
    /// A head-to-head sport with the default two players per match
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players_per_match: DEFAULT_PLAYERS_PER_MATCH,
            is_fixed_size: false,
        }
    }

    /// A 2-vs-2 team format with a fixed player count of four
    pub fn team(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players_per_match: TEAM_MATCH_PLAYERS,
            is_fixed_size: true,
        }
    }

    /// A non-fixed sport with a custom player count
    pub fn with_players(name: impl Into<String>, players_per_match: usize) -> RosterResult<Self> {
        let mut sport = Self::new(name);
        sport.set_players_per_match(players_per_match)?;
        Ok(sport)
    }

    pub fn players_per_match(&self) -> usize {
        self.players_per_match
    }

    pub fn is_fixed_size(&self) -> bool {
        self.is_fixed_size
    }

    /// Team sports declare a pair of players as the winner
    pub fn is_team_sport(&self) -> bool {
        self.is_fixed_size && self.players_per_match == TEAM_MATCH_PLAYERS
    }

    /// Number of players on each side of a team sport
    pub fn team_size(&self) -> Option<usize> {
        self.is_team_sport().then_some(self.players_per_match / 2)
    }

    /// Edit the player count
    ///
    /// # Errors
    ///
    /// Fails for fixed-size sports and for counts below two.
    pub fn set_players_per_match(&mut self, players: usize) -> RosterResult<()> {
        if self.is_fixed_size {
            return Err(RosterError::FixedSize(self.name.clone()));
        }

        if players < DEFAULT_PLAYERS_PER_MATCH {
            return Err(RosterError::InvalidPlayersPerMatch {
                sport: self.name.clone(),
                players,
            });
        }

        self.players_per_match = players;
        Ok(())
    }

    pub fn validate(&self) -> RosterResult<()> {
        if self.name.trim().is_empty() {
            return Err(RosterError::EmptySportName);
        }

        if self.players_per_match < DEFAULT_PLAYERS_PER_MATCH {
            return Err(RosterError::InvalidPlayersPerMatch {
                sport: self.name.clone(),
                players: self.players_per_match,
            });
        }

        Ok(())
    }
}

/// Stored shape of a [`SportConfig`], checked before it is accepted
#[derive(Deserialize)]
struct SportRecord {
    name: String,
    players_per_match: usize,
    #[serde(default)]
    is_fixed_size: bool,
}

impl TryFrom<SportRecord> for SportConfig {
    type Error = RosterError;

    fn try_from(record: SportRecord) -> Result<Self, Self::Error> {
        let sport = Self {
            name: record.name,
            players_per_match: record.players_per_match,
            is_fixed_size: record.is_fixed_size,
        };
        sport.validate()?;
        Ok(sport)
    }
}

/// The set of sports offered at the meet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<SportConfig>", try_from = "Vec<SportConfig>")]
pub struct SportCatalog {
    sports: Vec<SportConfig>,
}

impl SportCatalog {
    pub fn new() -> Self {
        Self { sports: Vec::new() }
    }

    /// Build a catalog, rejecting invalid or duplicate entries
    pub fn from_sports(sports: Vec<SportConfig>) -> RosterResult<Self> {
        let mut catalog = Self::new();
        for sport in sports {
            catalog.add(sport)?;
        }
        Ok(catalog)
    }

    pub fn add(&mut self, sport: SportConfig) -> RosterResult<()> {
        sport.validate()?;
        if self.get(&sport.name).is_some() {
            return Err(RosterError::DuplicateSport(sport.name));
        }
        self.sports.push(sport);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SportConfig> {
        self.sports.iter().find(|s| s.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SportConfig> {
        self.sports.iter_mut().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SportConfig> {
        self.sports.iter()
    }

    pub fn len(&self) -> usize {
        self.sports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sports.is_empty()
    }

    pub fn as_slice(&self) -> &[SportConfig] {
        &self.sports
    }
}

impl TryFrom<Vec<SportConfig>> for SportCatalog {
    type Error = RosterError;

    fn try_from(sports: Vec<SportConfig>) -> Result<Self, Self::Error> {
        Self::from_sports(sports)
    }
}

impl From<SportCatalog> for Vec<SportConfig> {
    fn from(catalog: SportCatalog) -> Self {
        catalog.sports
    }
}

impl Default for SportCatalog {
    /// The standard meet programme, including the Carrom doubles format
    fn default() -> Self {
        let mut sports: Vec<SportConfig> = [
            "Badminton",
            "Chess",
            "Table Tennis",
            "Carrom",
            "100m Race",
            "Football",
            "Basketball",
        ]
        .into_iter()
        .map(SportConfig::new)
        .collect();
        sports.push(SportConfig::team("Carrom (2vs2)"));

        Self { sports }
    }
}

/// All registered participants, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, classifying every participant with `bands`
    pub fn from_participants(
        participants: Vec<Participant>,
        bands: &CategoryBands,
    ) -> RosterResult<Self> {
        let mut roster = Self::new();
        for participant in participants {
            roster.insert(participant, bands)?;
        }
        Ok(roster)
    }

    /// Deduplicate sports, validate, classify and add a participant
    pub fn insert(
        &mut self,
        mut participant: Participant,
        bands: &CategoryBands,
    ) -> RosterResult<()> {
        participant.dedup_sports();
        participant.validate()?;
        if self.get(participant.id).is_some() {
            return Err(RosterError::DuplicateParticipant(participant.id));
        }
        participant.classify(bands);
        self.participants.push(participant);
        Ok(())
    }

    pub fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(index))
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_new_classifies_grade() {
        let p = Participant::new(1, "Asha", 6, GenderGroup::Girls, ["Chess"]).unwrap();
        assert_eq!(p.category, Category::Middle);
        assert_eq!(p.category_group().to_string(), "Middle-Girls");
    }

    #[test]
    fn test_participant_sports_deduplicated() {
        let p = Participant::new(1, "Ravi", 9, GenderGroup::Boys, ["Chess", "Chess", "Carrom"])
            .unwrap();
        assert_eq!(p.sports, vec!["Chess".to_string(), "Carrom".to_string()]);
    }

    #[test]
    fn test_participant_sport_limit() {
        let result = Participant::new(
            1,
            "Ravi",
            9,
            GenderGroup::Boys,
            ["Chess", "Carrom", "Football", "Basketball"],
        );
        assert_eq!(
            result,
            Err(RosterError::TooManySports { count: 4, max: 3 })
        );
    }

    #[test]
    fn test_participant_requires_name_and_sport() {
        assert_eq!(
            Participant::new(1, "  ", 5, GenderGroup::Boys, ["Chess"]),
            Err(RosterError::EmptyName)
        );
        assert_eq!(
            Participant::new(1, "Ravi", 5, GenderGroup::Boys, Vec::<String>::new()),
            Err(RosterError::NoSports)
        );
    }

    #[test]
    fn test_category_group_round_trip_key() {
        let group: CategoryGroup = "Senior-Girls".parse().unwrap();
        assert_eq!(group, CategoryGroup::new(Category::Senior, GenderGroup::Girls));
        assert!("Senior".parse::<CategoryGroup>().is_err());
        assert!("Senior-Others".parse::<CategoryGroup>().is_err());
    }

    #[test]
    fn test_category_group_serializes_as_key() {
        let group = CategoryGroup::new(Category::Junior, GenderGroup::Boys);
        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, "\"Junior-Boys\"");
    }

    #[test]
    fn test_team_sport_detection() {
        let doubles = SportConfig::team("Carrom (2vs2)");
        assert!(doubles.is_team_sport());
        assert_eq!(doubles.team_size(), Some(2));

        let relay = SportConfig::with_players("Relay", 4).unwrap();
        assert!(!relay.is_team_sport());
        assert_eq!(relay.team_size(), None);
    }

    #[test]
    fn test_fixed_size_sport_rejects_edit() {
        let mut doubles = SportConfig::team("Carrom (2vs2)");
        assert_eq!(
            doubles.set_players_per_match(2),
            Err(RosterError::FixedSize("Carrom (2vs2)".to_string()))
        );
        assert_eq!(doubles.players_per_match(), 4);
    }

    #[test]
    fn test_players_per_match_minimum() {
        let result = SportConfig::with_players("Solo", 1);
        assert!(matches!(
            result,
            Err(RosterError::InvalidPlayersPerMatch { players: 1, .. })
        ));
    }

    #[test]
    fn test_default_catalog() {
        let catalog = SportCatalog::default();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("Chess").unwrap().players_per_match(), 2);
        assert!(catalog.get("Carrom (2vs2)").unwrap().is_team_sport());
        assert!(catalog.get("Cricket").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let mut catalog = SportCatalog::default();
        assert_eq!(
            catalog.add(SportConfig::new("Chess")),
            Err(RosterError::DuplicateSport("Chess".to_string()))
        );
    }

    #[test]
    fn test_deserialized_sport_is_validated() {
        let result = serde_json::from_str::<SportConfig>(r#"{"name":"Chess","players_per_match":0}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<SportConfig>(r#"{"name":" ","players_per_match":2}"#);
        assert!(result.is_err());

        let relay: SportConfig =
            serde_json::from_str(r#"{"name":"Relay","players_per_match":4}"#).unwrap();
        assert_eq!(relay.players_per_match(), 4);
        assert!(!relay.is_fixed_size());
    }

    #[test]
    fn test_deserialized_catalog_is_validated() {
        let zero = r#"[{"name":"Chess","players_per_match":0}]"#;
        assert!(serde_json::from_str::<SportCatalog>(zero).is_err());

        let duplicate = r#"[{"name":"Chess","players_per_match":2},{"name":"Chess","players_per_match":3}]"#;
        assert!(serde_json::from_str::<SportCatalog>(duplicate).is_err());

        let json = serde_json::to_string(&SportCatalog::default()).unwrap();
        let catalog: SportCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(catalog, SportCatalog::default());
    }

    #[test]
    fn test_roster_insert_deduplicates_imported_sports() {
        let json = r#"{"id":3,"name":"Kavi","grade":5,"gender":"Boys","sports":["Chess","Chess","Chess","Badminton"]}"#;
        let p: Participant = serde_json::from_str(json).unwrap();

        let mut roster = Roster::new();
        roster.insert(p, &CategoryBands::default()).unwrap();
        assert_eq!(
            roster.get(3).unwrap().sports,
            vec!["Chess".to_string(), "Badminton".to_string()]
        );
    }

    #[test]
    fn test_roster_insert_reclassifies_and_rejects_duplicates() {
        let bands = CategoryBands::default();
        let mut roster = Roster::new();
        let mut p = Participant::new(7, "Mina", 8, GenderGroup::Girls, ["Chess"]).unwrap();
        p.category = Category::Junior;

        roster.insert(p.clone(), &bands).unwrap();
        assert_eq!(roster.get(7).unwrap().category, Category::Senior);
        assert_eq!(
            roster.insert(p, &bands),
            Err(RosterError::DuplicateParticipant(7))
        );
        assert_eq!(roster.len(), 1);
    }
}
