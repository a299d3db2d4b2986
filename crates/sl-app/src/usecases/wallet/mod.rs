//! Wallet status use cases.

mod apply_status;
mod entry_route;
mod reset;

pub use apply_status::ApplyWalletStatus;
pub use entry_route::{EntryRoute, ResolveEntryRoute};
pub use reset::ResetPairing;
