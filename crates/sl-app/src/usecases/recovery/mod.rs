//! Backup recovery use cases.

mod controller;

pub use controller::{RecoveryControllerDeps, RecoverySessionController, RecoveryStep};
