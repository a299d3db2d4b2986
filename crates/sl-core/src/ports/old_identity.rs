use async_trait::async_trait;

use crate::recovery::Identity;

/// Locally persisted identity known before a repair flow started.
#[async_trait]
pub trait OldIdentityPort: Send + Sync {
    async fn get_old_identity(&self) -> anyhow::Result<Option<Identity>>;

    async fn set_old_identity(&self, identity: &Identity) -> anyhow::Result<()>;

    async fn clear_old_identity(&self) -> anyhow::Result<()>;
}
