use sl_core::ids::AttemptToken;
use sl_core::pairing::{PairingFailure, PairingPhase};
use sl_core::ports::{EstablisherError, KeygenError, RecoveryError};
use sl_core::wallet::WalletStatusError;

/// Caller-visible failure of a pairing or recovery attempt.
///
/// Mismatched recovery is a success outcome and never shows up here.
#[derive(Debug, thiserror::Error)]
pub enum PairingError {
    #[error(transparent)]
    Establisher(#[from] EstablisherError),
    #[error(transparent)]
    Keygen(#[from] KeygenError),
    #[error(transparent)]
    Recovery(#[from] RecoveryError),
    #[error(transparent)]
    WalletStatus(#[from] WalletStatusError),
    /// A newer `start()` invalidated this continuation.
    #[error("pairing attempt {0} was superseded")]
    StaleAttempt(AttemptToken),
    #[error("local storage failed: {0}")]
    Storage(#[source] anyhow::Error),
    /// The attempt stopped without reaching a settled phase.
    #[error("pairing attempt interrupted in phase {0:?}")]
    Interrupted(PairingPhase),
}

impl PairingError {
    /// Failure reason recorded in the attempt phase.
    pub fn failure(&self) -> PairingFailure {
        let message = self.to_string();
        match self {
            PairingError::Establisher(_) | PairingError::Interrupted(_) => {
                PairingFailure::Establisher(message)
            }
            PairingError::Keygen(_) => PairingFailure::Keygen(message),
            PairingError::Recovery(_) => PairingFailure::Recovery(message),
            PairingError::WalletStatus(_)
            | PairingError::Storage(_)
            | PairingError::StaleAttempt(_) => PairingFailure::Storage(message),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, PairingError::StaleAttempt(_))
    }
}
