//! Persisted wallet status register.

use serde::{Deserialize, Serialize};

/// Wallet status persisted across page loads of the same client.
///
/// Normal flow only moves forward: `Unpaired → Paired → BackedUp → Minted`.
/// `Mismatched` is terminal until the user explicitly resets pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletStatus {
    #[default]
    Unpaired,
    Paired,
    BackedUp,
    Minted,
    Mismatched,
}

impl WalletStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// The store itself never validates; callers consult this table before
    /// every write.
    pub fn can_transition_to(self, next: WalletStatus) -> bool {
        use WalletStatus::*;
        match (self, next) {
            (Unpaired, Paired) => true,
            (Paired, BackedUp) => true,
            (BackedUp, Minted) => true,
            // Backup recovery restores an already backed-up key share.
            (Unpaired, BackedUp) | (Minted, BackedUp) => true,
            // Repair without a backup generates a new key that still needs one.
            (Minted, Paired) => true,
            (Mismatched, _) => false,
            (_, Mismatched) => true,
            _ => false,
        }
    }

    /// Validate a transition, returning the new status on success.
    pub fn transition_to(self, next: WalletStatus) -> Result<WalletStatus, WalletStatusError> {
        if self.can_transition_to(next) {
            return Ok(next);
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(from = ?self, to = ?next, "rejected wallet status transition");
        Err(WalletStatusError::IllegalTransition {
            from: self,
            to: next,
        })
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WalletStatus::Mismatched)
    }
}

/// Errors produced while reading or advancing the wallet status.
#[derive(Debug, thiserror::Error)]
pub enum WalletStatusError {
    #[error("illegal wallet status transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: WalletStatus,
        to: WalletStatus,
    },
    #[error("wallet status store failed: {0}")]
    Store(#[source] anyhow::Error),
}
