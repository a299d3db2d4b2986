//! File-based wallet status repository
//!
//! Persists the wallet status register to a JSON file in the state
//! directory so that page entry can resume after a reload.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use sl_core::ports::WalletStatusPort;
use sl_core::wallet::WalletStatus;

pub const DEFAULT_WALLET_STATUS_FILE: &str = "wallet_status.json";

#[derive(Debug, Serialize, Deserialize)]
struct WalletStatusRecord {
    status: WalletStatus,
    updated_at: DateTime<Utc>,
}

pub struct FileWalletStatusRepository {
    status_file_path: PathBuf,
}

impl FileWalletStatusRepository {
    /// Create repository with custom file path
    pub fn new(status_file_path: PathBuf) -> Self {
        Self { status_file_path }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            status_file_path: base_dir.join(DEFAULT_WALLET_STATUS_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.status_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl WalletStatusPort for FileWalletStatusRepository {
    async fn get_status(&self) -> anyhow::Result<WalletStatus> {
        if !fs::try_exists(&self.status_file_path).await? {
            return Ok(WalletStatus::default());
        }

        let content = fs::read_to_string(&self.status_file_path).await?;
        if content.trim().is_empty() {
            return Ok(WalletStatus::default());
        }

        let record: WalletStatusRecord = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse wallet status: {e}"))?;

        Ok(record.status)
    }

    async fn set_status(&self, status: WalletStatus) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let record = WalletStatusRecord {
            status,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| anyhow::anyhow!("Failed to serialize wallet status: {e}"))?;

        let mut file = fs::File::create(&self.status_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create wallet status file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write wallet status file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync wallet status file: {e}"))?;

        debug!(?status, path = %self.status_file_path.display(), "wallet status persisted");
        Ok(())
    }

    async fn clear_status(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.status_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove wallet status file: {e}")),
        }
    }
}
