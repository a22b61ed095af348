//! Meet-wide settings.

use serde::{Deserialize, Serialize};

use crate::roster::CategoryBands;
use crate::schedule::RedeclarePolicy;

/// Settings that shape how the meet manager behaves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetSettings {
    /// Grade bands used to classify participants
    pub bands: CategoryBands,

    /// When set, a finished match keeps its winner unless it is amended
    /// explicitly (default: false, re-declaring overwrites)
    pub strict_winner_declaration: bool,
}

impl MeetSettings {
    pub fn redeclare_policy(&self) -> RedeclarePolicy {
        if self.strict_winner_declaration {
            RedeclarePolicy::Reject
        } else {
            RedeclarePolicy::Overwrite
        }
    }
}
