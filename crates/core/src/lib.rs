//! Levelgate core data models.
//!
//! This crate defines the progression data model: user profiles, the
//! static level/unlock/reward tables, and the pure functions that map
//! points to levels and levels to visible resources.

#![warn(missing_docs)]

// Core identities
mod id;

// Persisted user record
mod profile;

// Static progression tables
mod level;
mod unlock;
mod reward;
mod config;

// Award results and event payloads
mod outcome;

// Re-exports
pub use id::UserId;
pub use profile::Profile;
pub use level::{LevelProgress, LevelTable};
pub use unlock::UnlockTable;
pub use reward::ActivityRewardTable;
pub use config::{ConfigError, ProgressionConfig};
pub use outcome::{AwardOutcome, LevelChange};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
