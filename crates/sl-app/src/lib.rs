//! # sl-app
//!
//! Pairing and recovery use cases.
//!
//! Controllers here sequence the external session establisher, the two
//! countdowns, the password prompt and the wallet status register. They
//! depend only on the port traits from `sl-core`.

pub mod usecases;

#[cfg(test)]
pub(crate) mod test_support;

pub use usecases::pairing::{
    LeavePairing, PairingContext, PairingControllerDeps, PairingError, PairingSessionController,
    PairingStep, RecoveryHandoff,
};
pub use usecases::recovery::{RecoveryControllerDeps, RecoverySessionController, RecoveryStep};
pub use usecases::session::{SessionOutcome, SessionResolver};
pub use usecases::wallet::{ApplyWalletStatus, EntryRoute, ResetPairing, ResolveEntryRoute};
