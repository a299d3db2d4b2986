//! Pairing use cases.
//!
//! `PairingSessionController` owns the QR and confirmation half of an
//! attempt. `PairingContext` is shared with the recovery controller and
//! `LeavePairing` so that all of them agree on which attempt is current.

mod context;
mod controller;
mod error;
mod leave;

pub use context::{PairingContext, PairingSnapshot};
pub use controller::{
    PairingControllerDeps, PairingSessionController, PairingStep, RecoveryHandoff,
};
pub use error::PairingError;
pub use leave::LeavePairing;
