//! External MPC session establisher.
//!
//! The threshold key generation protocol and the relay transport live behind
//! this port; the pairing use cases only sequence its calls.

use async_trait::async_trait;
use thiserror::Error;

use crate::pairing::{PairingSession, QrPayload};
use crate::recovery::Identity;
use crate::security::SecretString;

/// QR issuance or session confirmation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstablisherError {
    #[error("pairing relay request failed: {0}")]
    Relay(String),

    #[error("pairing session rejected: {0}")]
    Rejected(String),
}

/// Fresh key generation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeygenError {
    #[error("key generation failed: {0}")]
    Failed(String),
}

/// Backup recovery failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("wrong backup password")]
    WrongPassword,

    #[error("backup data corrupt: {0}")]
    BackupCorrupt(String),

    #[error("recovery rejected by backend: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait PairingEstablisherPort: Send + Sync {
    /// Request a fresh QR payload for the remote device to scan.
    async fn initiate_pairing(&self) -> Result<QrPayload, EstablisherError>;

    /// Resolve once the remote device completed its half of the handshake
    /// for the most recently issued QR payload.
    async fn await_session_confirmation(&self) -> Result<PairingSession, EstablisherError>;

    /// Finish a pairing whose session carries no backup.
    async fn complete_fresh_pairing(&self, session: &PairingSession)
        -> Result<(), EstablisherError>;

    async fn run_keygen(&self) -> Result<(), KeygenError>;

    /// Decrypt and validate the session backup, returning the identity of
    /// the reconstructed key.
    async fn complete_recovery_session(
        &self,
        session: &PairingSession,
        old_identity: Option<&Identity>,
        password: &SecretString,
    ) -> Result<Identity, RecoveryError>;
}
