//! Eligibility, pairing and match lifecycle.
//!
//! This module is the scheduling engine of the meet:
//! - [`eligibility`]: who may still be paired for a sport, split by category group
//! - [`scheduler`]: manual pairing and automatic batch pairing
//! - [`lifecycle`]: winner declaration (single players or team sides) and deletion
//! - [`status`]: not-played / playing / played per participant and sport
//!
//! Every function takes the roster and match collections it works on as
//! arguments; none of them keeps state between calls.
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use sports_meet::roster::{CategoryGroup, GenderGroup, Participant, SportCatalog};
//! use sports_meet::schedule::{MatchBook, eligibility, scheduler};
//!
//! let catalog = SportCatalog::default();
//! let participants: Vec<Participant> = (1..=3)
//!     .map(|id| Participant::new(id, format!("P{id}"), 6, GenderGroup::Boys, ["Chess"]).unwrap())
//!     .collect();
//! let mut book = MatchBook::new();
//!
//! let group: CategoryGroup = "Middle-Boys".parse().unwrap();
//! scheduler::create_match(&catalog, "Chess", &group, &[1, 2], &participants, &mut book, Utc::now())
//!     .unwrap();
//!
//! let pool = eligibility::eligible_pool("Chess", &participants, book.as_slice());
//! assert_eq!(pool.len(), 1);
//! ```

pub mod eligibility;
pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod scheduler;
pub mod shuffle;
pub mod status;

pub use errors::{MeetError, MeetResult, ValidationError};
pub use lifecycle::RedeclarePolicy;
pub use models::{Match, MatchBook, MatchId, MatchStatus, Winner};
pub use scheduler::{
    AutoPlan, AutoScheduleOutcome, AutoScheduleReport, ManualSelection, NoOpReason, PlannedMatch,
};
pub use shuffle::{RandomShuffler, SeededShuffler, Shuffler};
pub use status::ParticipationStatus;
