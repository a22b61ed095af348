//! Participants, sports and age categories.
//!
//! The roster is owned by the registration side of the meet. The scheduling
//! engine only reads it:
//! - [`Participant`] records with their registered sports
//! - [`SportConfig`] match formats, including 2-vs-2 team formats
//! - [`CategoryBands`] mapping grades to [`Category`] age bands

pub mod category;
pub mod errors;
pub mod models;

pub use category::{Category, CategoryBands, classify, parse_grade_range};
pub use errors::{RosterError, RosterResult};
pub use models::{
    CategoryGroup, DEFAULT_PLAYERS_PER_MATCH, GenderGroup, MAX_SPORTS_PER_PARTICIPANT,
    Participant, ParticipantId, Roster, SportCatalog, SportConfig, TEAM_MATCH_PLAYERS,
};
