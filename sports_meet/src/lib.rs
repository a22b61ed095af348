//! # Sports Meet
//!
//! Eligibility and match scheduling for a multi-sport youth meet.
//!
//! Participants register for up to three sports. For each sport the engine
//! works out who may still be paired, groups them by age category and gender,
//! pairs them manually or automatically, and follows every match to its
//! winner. Team formats (2 vs 2) declare a side of the match as the winner.
//!
//! Each participant gets a single match per sport: once they appear in a
//! match of a sport, scheduled or finished, they are out of that sport's pool
//! until the match is deleted.
//!
//! ## Core Modules
//!
//! - [`roster`]: participants, sports and age categories
//! - [`schedule`]: eligibility, pairing, winner declaration and status
//! - [`meet`]: the [`MeetManager`] facade, statistics and results
//! - [`store`]: JSON snapshot persistence
//!
//! ## Example
//!
//! ```
//! use sports_meet::{MeetManager, ParticipationStatus};
//! use sports_meet::roster::{GenderGroup, Participant};
//!
//! let mut meet = MeetManager::default();
//! meet.import_participants(vec![
//!     Participant::new(1, "Ravi", 8, GenderGroup::Boys, ["Carrom (2vs2)"]).unwrap(),
//!     Participant::new(2, "Arun", 9, GenderGroup::Boys, ["Carrom (2vs2)"]).unwrap(),
//!     Participant::new(3, "Dev", 9, GenderGroup::Boys, ["Carrom (2vs2)"]).unwrap(),
//!     Participant::new(4, "Kiran", 10, GenderGroup::Boys, ["Carrom (2vs2)"]).unwrap(),
//! ])
//! .unwrap();
//!
//! let group = "Senior-Boys".parse().unwrap();
//! let m = meet.create_match("Carrom (2vs2)", &group, &[1, 2, 3, 4]).unwrap();
//!
//! // Team sports: the winner is one of the positional sides
//! assert!(meet.declare_winner(m.id, &[1, 3]).is_err());
//! meet.declare_winner(m.id, &[3, 4]).unwrap();
//!
//! assert_eq!(meet.status_of(1, "Carrom (2vs2)"), ParticipationStatus::Played);
//! ```

/// Participants, sports and age categories.
pub mod roster;
pub use roster::{
    Category, CategoryBands, CategoryGroup, GenderGroup, Participant, ParticipantId, Roster,
    SportCatalog, SportConfig,
};

/// Eligibility, pairing and match lifecycle.
pub mod schedule;
pub use schedule::{
    AutoScheduleOutcome, Match, MatchId, MatchStatus, MeetError, MeetResult, ParticipationStatus,
    ValidationError, Winner,
};

/// Meet manager, statistics and results.
pub mod meet;
pub use meet::{MeetManager, MeetSettings, MeetState, MeetStats};

/// JSON snapshot persistence.
pub mod store;
pub use store::{SnapshotStore, StoreConfig, StoreError};
