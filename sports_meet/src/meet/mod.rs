//! Meet management facade.
//!
//! [`MeetManager`] owns the roster, the sport catalog and the match book,
//! and runs every scheduling operation against them:
//! - Eligibility queries for the pairing screens
//! - Manual pairing, including the pairing form state
//! - Automatic pairing of every eligible group of a sport
//! - Winner declaration, correction and match deletion
//! - Participation status, dashboard statistics and results
//!
//! ## Example
//!
//! ```
//! use sports_meet::meet::MeetManager;
//! use sports_meet::roster::{GenderGroup, Participant};
//!
//! let mut meet = MeetManager::default();
//! meet.import_participants(vec![
//!     Participant::new(1, "Asha", 6, GenderGroup::Girls, ["Chess"]).unwrap(),
//!     Participant::new(2, "Mina", 7, GenderGroup::Girls, ["Chess"]).unwrap(),
//! ])
//! .unwrap();
//!
//! let outcome = meet.auto_schedule("Chess").unwrap();
//! let m = &outcome.created()[0];
//! meet.declare_winner(m.id, &[1]).unwrap();
//! assert_eq!(meet.stats().progress_percent, 100);
//! ```

pub mod manager;
pub mod settings;
pub mod stats;

pub use manager::{MeetManager, MeetState};
pub use settings::MeetSettings;
pub use stats::{MeetStats, ResultEntry, results_board};
