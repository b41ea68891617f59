//! JSON file storage implementation.
//!
//! Stores the active record in `current_user.json` and the known-user
//! collection in `users.json` under a root directory. Missing files read
//! as absent; malformed files surface as errors.

use super::{Result, Storage};
use levelgate_core::Profile;
use std::path::Path;
use tokio::fs;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: std::path::PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn current_path(&self) -> std::path::PathBuf {
        self.root.join("current_user.json")
    }

    fn users_path(&self) -> std::path::PathBuf {
        self.root.join("users.json")
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn load_current(&self) -> Result<Option<Profile>> {
        read_json(&self.current_path()).await
    }

    async fn save_current(&mut self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.current_path(), json.as_bytes()).await?;
        tracing::debug!(user = %profile.id, "saved active record");
        Ok(())
    }

    async fn clear_current(&mut self) -> Result<()> {
        fs::remove_file(self.current_path()).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Ok(())
            } else {
                Err(e)
            }
        })?;
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let profiles: Option<Vec<Profile>> = read_json(&self.users_path()).await?;
        Ok(profiles.unwrap_or_default())
    }

    async fn upsert_profile(&mut self, profile: &Profile) -> Result<()> {
        let mut profiles = self.list_profiles().await?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        let json = serde_json::to_string_pretty(&profiles)?;
        fs::write(self.users_path(), json.as_bytes()).await?;
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
