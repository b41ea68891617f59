//! Level-gated resource visibility.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Resources that become visible at each level.
///
/// A resource appears in exactly one level's set; once a user's level
/// reaches that level the resource stays unlocked, so visibility
/// accumulates monotonically as levels rise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockTable {
    unlocks: BTreeMap<u8, BTreeSet<String>>,
}

impl UnlockTable {
    /// Build a table from a level-to-resources map. Invariants are checked
    /// by [`crate::ProgressionConfig::validate`].
    pub fn new(unlocks: BTreeMap<u8, BTreeSet<String>>) -> Self {
        Self { unlocks }
    }

    /// Resources that first appear at exactly `level`.
    pub fn introduced_at(&self, level: u8) -> Option<&BTreeSet<String>> {
        self.unlocks.get(&level)
    }

    /// All resources visible at `level`: the union of every set from level
    /// zero up to and including it.
    pub fn unlocked_at(&self, level: u8) -> BTreeSet<String> {
        self.unlocks
            .range(0..=level)
            .flat_map(|(_, resources)| resources.iter().cloned())
            .collect()
    }

    /// Whether `resource` is visible at `level`.
    pub fn is_unlocked(&self, resource: &str, level: u8) -> bool {
        self.unlocks
            .range(0..=level)
            .any(|(_, resources)| resources.contains(resource))
    }

    /// Resources not yet visible at `level`.
    pub fn locked_at(&self, level: u8) -> BTreeSet<String> {
        self.unlocks
            .range(level.saturating_add(1)..)
            .flat_map(|(_, resources)| resources.iter().cloned())
            .collect()
    }

    /// Every resource the table knows about, across all levels.
    pub fn all_resources(&self) -> BTreeSet<String> {
        self.unlocks
            .values()
            .flat_map(|resources| resources.iter().cloned())
            .collect()
    }

    /// Levels that introduce at least one resource.
    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.unlocks.keys().copied()
    }
}

impl Default for UnlockTable {
    fn default() -> Self {
        let mut unlocks: BTreeMap<u8, BTreeSet<String>> = BTreeMap::new();
        let mut insert = |level: u8, resources: &[&str]| {
            unlocks.insert(
                level,
                resources.iter().map(|r| (*r).to_string()).collect(),
            );
        };
        insert(0, &["index.html", "login.html", "dashboard.html"]);
        insert(1, &["divisions.html", "chat.html"]);
        insert(
            2,
            &[
                "division-convergence.html",
                "division-support.html",
                "division-engineering.html",
                "division-foreign.html",
                "division-port.html",
            ],
        );
        insert(3, &["phenomenon.html"]);
        insert(4, &["missions.html"]);
        insert(5, &["classified.html"]);
        Self { unlocks }
    }
}
