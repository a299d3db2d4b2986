//! Wallet status domain module.

mod status;

pub use status::{WalletStatus, WalletStatusError};
