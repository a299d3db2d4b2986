//! Pairing domain module.
//!
//! Defines the pairing session value, the attempt state machine and the
//! display view pushed to the caller.

pub mod session;
pub mod state_machine;
mod view;

pub use session::{BackupData, PairingSession, QrPayload, QR_PLACEHOLDER};
pub use state_machine::{
    PairingAction, PairingEvent, PairingFailure, PairingPhase, PairingStateMachine,
};
pub use view::PairingView;
