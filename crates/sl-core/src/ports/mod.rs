//! Port interfaces for the application layer
//!
//! Ports define the contract between the pairing use cases and the
//! collaborators they drive: the persisted status register, the old
//! identity store, the external session establisher, countdown timers,
//! the password prompt, and the UI event sink.
//!
//! Implementations live in `sl-infra` or are supplied by the embedding
//! application.

mod countdown;
mod establisher;
mod old_identity;
mod pairing_event;
mod password_prompt;
mod wallet_status;

pub use countdown::CountdownPort;
pub use establisher::{EstablisherError, KeygenError, PairingEstablisherPort, RecoveryError};
pub use old_identity::OldIdentityPort;
pub use pairing_event::PairingEventPort;
pub use password_prompt::PasswordPromptPort;
pub use wallet_status::WalletStatusPort;
