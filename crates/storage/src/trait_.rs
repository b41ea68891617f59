//! Storage trait abstraction.

use async_trait::async_trait;
use levelgate_core::Profile;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error. Raised for corrupt persisted
    /// data; a corrupt record is never reported as an absent one.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for Levelgate data.
///
/// Two logical keys: the single active user record, and the collection of
/// all known user records. This trait allows different backends to be
/// plugged in.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Active record ===

    /// Load the active user record, if one is set.
    async fn load_current(&self) -> Result<Option<Profile>>;

    /// Set the active user record.
    async fn save_current(&mut self, profile: &Profile) -> Result<()>;

    /// Clear the active user record.
    async fn clear_current(&mut self) -> Result<()>;

    // === Known-user collection ===

    /// List all known user records.
    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    /// Insert or replace the record with a matching id in the collection.
    async fn upsert_profile(&mut self, profile: &Profile) -> Result<()>;
}
