//! ShardLink
//!
//! Pairing page orchestration for a two-party MPC wallet: QR pairing,
//! fresh key generation, password-gated backup recovery, and the wallet
//! status register that decides where the user lands.
//!
//! The embedding application supplies the session establisher, the
//! password prompt and the event sink, then drives a [`bootstrap::PairingPage`].

pub mod bootstrap;

pub use sl_app::{EntryRoute, SessionOutcome};
pub use sl_core::{NavigationTarget, PairingConfig, PairingFlow, PairingView, WalletStatus};
