//! In-memory storage backend.
//!
//! Used by tests and by callers that embed the tracker without wanting
//! anything on disk. Same contract as the file backend, minus the files.

use super::{Result, Storage};
use levelgate_core::Profile;

/// Non-persistent storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    current: Option<Profile>,
    profiles: Vec<Profile>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn load_current(&self) -> Result<Option<Profile>> {
        Ok(self.current.clone())
    }

    async fn save_current(&mut self, profile: &Profile) -> Result<()> {
        self.current = Some(profile.clone());
        Ok(())
    }

    async fn clear_current(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.profiles.clone())
    }

    async fn upsert_profile(&mut self, profile: &Profile) -> Result<()> {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => self.profiles.push(profile.clone()),
        }
        Ok(())
    }
}
