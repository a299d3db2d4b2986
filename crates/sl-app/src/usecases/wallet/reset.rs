use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use sl_core::ports::{OldIdentityPort, WalletStatusPort};

/// Explicit reset / unpair.
///
/// Clears the persisted status so the next read yields `Unpaired`, and
/// forgets the old identity. This is the only way out of `Mismatched`.
pub struct ResetPairing {
    wallet_status: Arc<dyn WalletStatusPort>,
    old_identity: Arc<dyn OldIdentityPort>,
}

impl ResetPairing {
    pub fn new(
        wallet_status: Arc<dyn WalletStatusPort>,
        old_identity: Arc<dyn OldIdentityPort>,
    ) -> Self {
        Self {
            wallet_status,
            old_identity,
        }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let span = info_span!("usecase.wallet.reset");
        async {
            self.wallet_status.clear_status().await?;
            self.old_identity.clear_old_identity().await?;
            info!("pairing reset, wallet status cleared");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
