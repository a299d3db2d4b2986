//! # sl-infra
//!
//! Adapters behind the `sl-core` ports: JSON files for the wallet status
//! register and the old identity, and a tokio-driven countdown.

pub mod old_identity;
pub mod paths;
pub mod time;
pub mod wallet_status;

pub use old_identity::FileOldIdentityStore;
pub use paths::default_state_dir;
pub use time::TickingCountdown;
pub use wallet_status::FileWalletStatusRepository;
