use std::sync::Arc;

use tracing::info;

use sl_core::ports::WalletStatusPort;
use sl_core::wallet::{WalletStatus, WalletStatusError};

/// Use case for advancing the persisted wallet status.
///
/// Every write goes through the legal transition table; the store itself
/// accepts anything.
pub struct ApplyWalletStatus {
    wallet_status: Arc<dyn WalletStatusPort>,
}

impl ApplyWalletStatus {
    pub fn new(wallet_status: Arc<dyn WalletStatusPort>) -> Self {
        Self { wallet_status }
    }

    pub async fn current(&self) -> Result<WalletStatus, WalletStatusError> {
        self.wallet_status
            .get_status()
            .await
            .map_err(WalletStatusError::Store)
    }

    /// Move the register to `next`, rejecting illegal transitions without
    /// touching the store.
    pub async fn execute(&self, next: WalletStatus) -> Result<WalletStatus, WalletStatusError> {
        let current = self.current().await?;
        let next = current.transition_to(next)?;
        self.wallet_status
            .set_status(next)
            .await
            .map_err(WalletStatusError::Store)?;
        info!(from = ?current, to = ?next, "wallet status updated");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryWalletStatus;

    #[tokio::test]
    async fn forward_transition_is_written() {
        let store = Arc::new(MemoryWalletStatus::new(WalletStatus::Unpaired));
        let use_case = ApplyWalletStatus::new(store.clone());

        let status = use_case.execute(WalletStatus::Paired).await.unwrap();

        assert_eq!(status, WalletStatus::Paired);
        assert_eq!(store.snapshot(), WalletStatus::Paired);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn illegal_transition_leaves_store_untouched() {
        let store = Arc::new(MemoryWalletStatus::new(WalletStatus::Unpaired));
        let use_case = ApplyWalletStatus::new(store.clone());

        let err = use_case.execute(WalletStatus::Minted).await.unwrap_err();

        assert!(matches!(
            err,
            WalletStatusError::IllegalTransition {
                from: WalletStatus::Unpaired,
                to: WalletStatus::Minted,
            }
        ));
        assert_eq!(store.snapshot(), WalletStatus::Unpaired);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn mismatched_cannot_be_left_without_reset() {
        let store = Arc::new(MemoryWalletStatus::new(WalletStatus::Mismatched));
        let use_case = ApplyWalletStatus::new(store.clone());

        assert!(use_case.execute(WalletStatus::BackedUp).await.is_err());
        assert_eq!(store.snapshot(), WalletStatus::Mismatched);
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let store = Arc::new(MemoryWalletStatus::new(WalletStatus::Unpaired));
        store.fail_writes();
        let use_case = ApplyWalletStatus::new(store.clone());

        let err = use_case.execute(WalletStatus::Paired).await.unwrap_err();

        assert!(matches!(err, WalletStatusError::Store(_)));
    }
}
