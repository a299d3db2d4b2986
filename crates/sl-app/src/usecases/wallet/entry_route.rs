use std::sync::Arc;

use tracing::debug;

use sl_core::navigation::{NavigationTarget, PairingFlow};
use sl_core::wallet::WalletStatusError;

use super::ApplyWalletStatus;

/// Page-entry decision for a pairing flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRoute {
    /// The pairing page may run.
    Admit,
    /// Show a route loader and resume elsewhere.
    Redirect(NavigationTarget),
}

/// Reads the status register at the top of page entry and decides whether
/// the requested flow may run.
pub struct ResolveEntryRoute {
    apply_status: Arc<ApplyWalletStatus>,
}

impl ResolveEntryRoute {
    pub fn new(apply_status: Arc<ApplyWalletStatus>) -> Self {
        Self { apply_status }
    }

    pub async fn execute(&self, flow: PairingFlow) -> Result<EntryRoute, WalletStatusError> {
        let status = self.apply_status.current().await?;
        if flow.admits(status) {
            return Ok(EntryRoute::Admit);
        }
        let target = NavigationTarget::resume_for(status);
        debug!(?flow, ?status, ?target, "pairing entry redirected");
        Ok(EntryRoute::Redirect(target))
    }
}
