//! Point rewards for tracked activities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points awarded per activity kind.
///
/// Unknown activity kinds are worth zero points rather than being errors,
/// so callers can fire-and-forget activity names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityRewardTable {
    rewards: BTreeMap<String, u64>,
}

impl ActivityRewardTable {
    /// Build a table from an activity-to-points map.
    pub fn new(rewards: BTreeMap<String, u64>) -> Self {
        Self { rewards }
    }

    /// Points awarded for `activity`; zero when the kind is unknown.
    pub fn reward_for(&self, activity: &str) -> u64 {
        self.rewards.get(activity).copied().unwrap_or(0)
    }

    /// All known activity kinds with their rewards.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.rewards.iter().map(|(kind, points)| (kind.as_str(), *points))
    }
}

impl Default for ActivityRewardTable {
    fn default() -> Self {
        let rewards = [
            ("first_login", 50),
            ("profile_view", 10),
            ("chat_message", 5),
            ("division_view", 20),
            ("phenomenon_view", 30),
            ("mission_complete", 100),
            ("daily_login", 25),
        ]
        .into_iter()
        .map(|(kind, points)| (kind.to_string(), points))
        .collect();
        Self { rewards }
    }
}
