//! Progression configuration: the static tables bundled and validated.

use crate::{ActivityRewardTable, LevelProgress, LevelTable, UnlockTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Errors raised by configuration validation or loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The level table has no entries
    #[error("level table is empty")]
    EmptyLevels,

    /// Level zero must require zero points
    #[error("level 0 threshold must be 0, found {0}")]
    NonZeroBase(u64),

    /// Thresholds must rise strictly with level
    #[error("threshold for level {level} does not exceed the previous level")]
    NonIncreasingThreshold {
        /// Offending level
        level: u8,
    },

    /// An unlock entry references a level beyond the table
    #[error("unlock entry for level {level} exceeds max level {max}")]
    UnlockLevelOutOfRange {
        /// Offending level
        level: u8,
        /// Highest level the table defines
        max: u8,
    },

    /// A resource appears in more than one level's unlock set
    #[error("resource '{resource}' is unlocked at more than one level")]
    DuplicateResource {
        /// Offending resource identifier
        resource: String,
    },

    /// Configuration file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three static progression tables plus the anonymous allow-list,
/// loaded once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Points required per level
    #[serde(default)]
    pub levels: LevelTable,

    /// Resources introduced per level
    #[serde(default)]
    pub unlocks: UnlockTable,

    /// Points awarded per activity
    #[serde(default)]
    pub rewards: ActivityRewardTable,

    /// Resources visible without a logged-in user
    #[serde(default = "default_public_resources")]
    pub public_resources: BTreeSet<String>,
}

fn default_public_resources() -> BTreeSet<String> {
    ["index.html", "login.html"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            levels: LevelTable::default(),
            unlocks: UnlockTable::default(),
            rewards: ActivityRewardTable::default(),
            public_resources: default_public_resources(),
        }
    }
}

impl ProgressionConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the table invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = self.levels.thresholds();
        if thresholds.is_empty() {
            return Err(ConfigError::EmptyLevels);
        }
        if thresholds[0] != 0 {
            return Err(ConfigError::NonZeroBase(thresholds[0]));
        }
        for level in 1..thresholds.len() {
            if thresholds[level] <= thresholds[level - 1] {
                return Err(ConfigError::NonIncreasingThreshold {
                    level: level as u8,
                });
            }
        }

        let max = self.levels.max_level();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for level in self.unlocks.levels() {
            if level > max {
                return Err(ConfigError::UnlockLevelOutOfRange { level, max });
            }
            for resource in self.unlocks.introduced_at(level).into_iter().flatten() {
                if !seen.insert(resource) {
                    return Err(ConfigError::DuplicateResource {
                        resource: resource.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Whether `resource` is visible to an anonymous caller.
    pub fn is_public(&self, resource: &str) -> bool {
        self.public_resources.contains(resource)
    }

    /// Progress toward the next level for a point total and cached level.
    pub fn next_level_progress(&self, points: u64, level: u8) -> LevelProgress {
        self.levels.progress_toward_next(points, level)
    }
}
