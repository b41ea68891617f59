//! Award results - also the domain-event payload.

use crate::Profile;
use serde::{Deserialize, Serialize};

/// A level transition recorded by an award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    /// Level before the award
    pub from: u8,

    /// Level after the award
    pub to: u8,
}

/// The result of awarding points for an activity.
///
/// Carries the updated record, how many points the activity was worth, and
/// the level transition when one occurred. Published verbatim on the event
/// bus after every tracked activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardOutcome {
    /// The user record after the award
    pub user: Profile,

    /// Points this activity was worth (zero for unknown activities)
    pub points_gained: u64,

    /// Present when the award pushed the user over a threshold
    pub level_change: Option<LevelChange>,
}

impl AwardOutcome {
    /// Whether this award raised the user's level.
    pub fn leveled_up(&self) -> bool {
        self.level_change.is_some()
    }
}
