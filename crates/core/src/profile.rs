//! User profile - the persisted progression record.

use crate::id::UserId;
use crate::Time;
use serde::{Deserialize, Serialize};

/// A user's progression record.
///
/// Points and level default to zero on read so records written before the
/// progression fields existed stay loadable. Fields this crate does not
/// know about are captured in `extra` and written back verbatim, so other
/// parts of the application can keep their own profile data alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier
    pub id: UserId,

    /// Display name chosen at login
    pub name: String,

    /// Accumulated points; never decreases
    #[serde(default)]
    pub points: u64,

    /// Current level, derived from points and cached
    #[serde(default)]
    pub level: u8,

    /// Mutation counter, bumped on every award
    #[serde(default)]
    pub version: u64,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,

    /// Profile fields owned by other components, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    /// Create a fresh profile with zero points at level zero.
    pub fn new(name: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: UserId::new(),
            name: name.into(),
            points: 0,
            level: 0,
            version: 0,
            created_at: now,
            updated_at: now,
            extra: serde_json::Map::new(),
        }
    }
}
