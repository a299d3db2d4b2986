use async_trait::async_trait;

use crate::wallet::WalletStatus;

/// Durable single-value wallet status register.
///
/// The store performs no validation. Callers check
/// [`WalletStatus::can_transition_to`] before every `set_status`.
#[async_trait]
pub trait WalletStatusPort: Send + Sync {
    /// Current status; `Unpaired` when nothing was ever written.
    async fn get_status(&self) -> anyhow::Result<WalletStatus>;

    async fn set_status(&self, status: WalletStatus) -> anyhow::Result<()>;

    /// Forget the persisted status (explicit reset / unpair).
    async fn clear_status(&self) -> anyhow::Result<()>;
}
