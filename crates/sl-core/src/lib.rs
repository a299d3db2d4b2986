//! # sl-core
//!
//! Core domain models and ports for ShardLink.
//!
//! This crate contains the pairing and recovery domain without any
//! infrastructure dependencies: the wallet status register and its
//! transition table, the pairing phase state machine, countdown state,
//! and the port traits implemented by the infrastructure layer.

pub mod config;
pub mod ids;
pub mod navigation;
pub mod pairing;
pub mod ports;
pub mod recovery;
pub mod security;
pub mod timer;
pub mod wallet;

// Re-export commonly used types at the crate root
pub use config::PairingConfig;
pub use ids::{AttemptToken, PairingId};
pub use navigation::{NavigationTarget, PairingFlow};
pub use pairing::{BackupData, PairingPhase, PairingSession, PairingView, QrPayload};
pub use recovery::{Identity, RecoveryOutcome};
pub use security::SecretString;
pub use timer::{Countdown, TimerKind};
pub use wallet::{WalletStatus, WalletStatusError};
