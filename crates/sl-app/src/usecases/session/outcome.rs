use sl_core::navigation::NavigationTarget;
use sl_core::recovery::{Identity, RecoveryOutcome};

use crate::usecases::pairing::PairingError;

/// Terminal result of one pairing page run, switched on by the caller.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Fresh key generation done; proceed to backup.
    FreshPaired,
    /// Backup restored; proceed toward minting.
    BackedUpRecovered { identity: Identity },
    /// Repair recovered a different account; route to reconciliation.
    Mismatched { previous: Identity, current: Identity },
    /// The attempt failed. `fallback` is set when the flow forces the user
    /// off the QR screen.
    Failed {
        error: PairingError,
        fallback: Option<NavigationTarget>,
    },
    /// Password entry window closed; back to the QR screen.
    PasswordExpired,
    /// User left the password prompt; restart with a fresh QR.
    PromptCancelled,
    /// A newer attempt took over; ignore this result.
    Superseded,
}

impl SessionOutcome {
    /// Navigation the caller performs, if any.
    pub fn navigation(&self) -> Option<NavigationTarget> {
        match self {
            SessionOutcome::FreshPaired => Some(NavigationTarget::Backup),
            SessionOutcome::BackedUpRecovered { .. } => Some(NavigationTarget::Mint { repair: true }),
            SessionOutcome::Mismatched { .. } => Some(NavigationTarget::MismatchAccounts),
            SessionOutcome::Failed { fallback, .. } => *fallback,
            SessionOutcome::PasswordExpired
            | SessionOutcome::PromptCancelled
            | SessionOutcome::Superseded => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SessionOutcome::Failed { .. })
    }
}

impl From<RecoveryOutcome> for SessionOutcome {
    fn from(outcome: RecoveryOutcome) -> Self {
        match outcome {
            RecoveryOutcome::Recovered { identity } => SessionOutcome::BackedUpRecovered { identity },
            RecoveryOutcome::Mismatched { previous, current } => {
                SessionOutcome::Mismatched { previous, current }
            }
        }
    }
}
