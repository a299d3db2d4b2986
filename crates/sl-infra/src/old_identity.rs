//! File-based store for the identity known before a repair flow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use sl_core::ports::OldIdentityPort;
use sl_core::recovery::Identity;

pub const DEFAULT_OLD_IDENTITY_FILE: &str = "old_identity.json";

#[derive(Debug, Serialize, Deserialize)]
struct OldIdentityRecord {
    identity: Identity,
    recorded_at: DateTime<Utc>,
}

pub struct FileOldIdentityStore {
    identity_file_path: PathBuf,
}

impl FileOldIdentityStore {
    pub fn new(identity_file_path: PathBuf) -> Self {
        Self { identity_file_path }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            identity_file_path: base_dir.join(DEFAULT_OLD_IDENTITY_FILE),
        }
    }
}

#[async_trait]
impl OldIdentityPort for FileOldIdentityStore {
    async fn get_old_identity(&self) -> anyhow::Result<Option<Identity>> {
        if !fs::try_exists(&self.identity_file_path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.identity_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let record: OldIdentityRecord = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse old identity: {e}"))?;
        Ok(Some(record.identity))
    }

    async fn set_old_identity(&self, identity: &Identity) -> anyhow::Result<()> {
        if let Some(parent) = self.identity_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let record = OldIdentityRecord {
            identity: identity.clone(),
            recorded_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| anyhow::anyhow!("Failed to serialize old identity: {e}"))?;
        fs::write(&self.identity_file_path, json)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write old identity file: {e}"))
    }

    async fn clear_old_identity(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.identity_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove old identity file: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_means_no_old_identity() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOldIdentityStore::with_defaults(temp_dir.path().to_path_buf());

        assert_eq!(store.get_old_identity().await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOldIdentityStore::with_defaults(temp_dir.path().to_path_buf());

        store.set_old_identity(&Identity::from("0xAAA")).await.unwrap();
        assert_eq!(
            store.get_old_identity().await.unwrap(),
            Some(Identity::from("0xaaa"))
        );

        store.clear_old_identity().await.unwrap();
        assert_eq!(store.get_old_identity().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_OLD_IDENTITY_FILE);
        fs::write(&path, "not json").await.unwrap();

        let err = FileOldIdentityStore::new(path)
            .get_old_identity()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse old identity"));
    }
}
