//! Flow variants and the navigation targets handed back to the caller.

use serde::{Deserialize, Serialize};

use crate::wallet::WalletStatus;

/// Which variant of the pairing page is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingFlow {
    /// First-time setup of this client.
    Setup,
    /// Re-pairing an account already known on this client.
    Repair,
}

impl PairingFlow {
    pub fn is_repair(self) -> bool {
        matches!(self, PairingFlow::Repair)
    }

    /// Whether the pairing page may run for the persisted status.
    ///
    /// When this returns `false` the caller shows a route loader and resumes
    /// through [`NavigationTarget::resume_for`].
    pub fn admits(self, status: WalletStatus) -> bool {
        match self {
            PairingFlow::Setup => status == WalletStatus::Unpaired,
            PairingFlow::Repair => status == WalletStatus::Minted,
        }
    }

    /// Where a pairing failure sends the user, if anywhere.
    ///
    /// The setup flow keeps the user on the QR screen so `start()` can be
    /// invoked again.
    pub fn failure_fallback(self) -> Option<NavigationTarget> {
        match self {
            PairingFlow::Setup => None,
            PairingFlow::Repair => Some(NavigationTarget::Home),
        }
    }

    /// Target of the back button on the QR screen.
    pub fn back_target(self) -> NavigationTarget {
        match self {
            PairingFlow::Setup => NavigationTarget::Intro,
            PairingFlow::Repair => NavigationTarget::Home,
        }
    }
}

/// Page-level navigation decision made by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    Intro,
    Pair { repair: bool },
    Backup,
    Mint { repair: bool },
    MismatchAccounts,
    Home,
}

impl NavigationTarget {
    /// Route that resumes the flow for a status read at page entry.
    pub fn resume_for(status: WalletStatus) -> Self {
        match status {
            WalletStatus::Unpaired => NavigationTarget::Intro,
            WalletStatus::Paired => NavigationTarget::Backup,
            WalletStatus::BackedUp => NavigationTarget::Mint { repair: false },
            WalletStatus::Minted => NavigationTarget::Home,
            WalletStatus::Mismatched => NavigationTarget::MismatchAccounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_flow_only_admits_unpaired() {
        assert!(PairingFlow::Setup.admits(WalletStatus::Unpaired));
        assert!(!PairingFlow::Setup.admits(WalletStatus::Paired));
        assert!(!PairingFlow::Setup.admits(WalletStatus::Minted));
    }

    #[test]
    fn repair_flow_only_admits_minted() {
        assert!(PairingFlow::Repair.admits(WalletStatus::Minted));
        assert!(!PairingFlow::Repair.admits(WalletStatus::Unpaired));
        assert!(!PairingFlow::Repair.admits(WalletStatus::Mismatched));
    }

    #[test]
    fn only_repair_failures_navigate_home() {
        assert_eq!(PairingFlow::Setup.failure_fallback(), None);
        assert_eq!(
            PairingFlow::Repair.failure_fallback(),
            Some(NavigationTarget::Home)
        );
    }

    #[test]
    fn resume_route_follows_status() {
        assert_eq!(
            NavigationTarget::resume_for(WalletStatus::Paired),
            NavigationTarget::Backup
        );
        assert_eq!(
            NavigationTarget::resume_for(WalletStatus::Mismatched),
            NavigationTarget::MismatchAccounts
        );
    }
}
