use std::sync::Arc;

use tracing::{debug, info};

use sl_core::navigation::{NavigationTarget, PairingFlow};
use sl_core::ports::OldIdentityPort;

use super::context::PairingContext;

/// Back navigation from the QR screen.
pub struct LeavePairing {
    flow: PairingFlow,
    context: Arc<PairingContext>,
    old_identity: Arc<dyn OldIdentityPort>,
}

impl LeavePairing {
    pub fn new(
        flow: PairingFlow,
        context: Arc<PairingContext>,
        old_identity: Arc<dyn OldIdentityPort>,
    ) -> Self {
        Self {
            flow,
            context,
            old_identity,
        }
    }

    /// Returns `None` while the loading indicator is shown; otherwise the
    /// pending attempt is abandoned and the back target returned.
    ///
    /// Leaving a repair flow forgets the old identity.
    pub async fn execute(&self) -> anyhow::Result<Option<NavigationTarget>> {
        if !self.context.abandon_unless_loading().await {
            debug!(flow = ?self.flow, "back navigation ignored while loading");
            return Ok(None);
        }

        if self.flow.is_repair() {
            self.old_identity.clear_old_identity().await?;
        }

        let target = self.flow.back_target();
        info!(flow = ?self.flow, ?target, "left pairing page");
        Ok(Some(target))
    }
}
